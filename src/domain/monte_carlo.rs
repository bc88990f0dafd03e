pub mod aggregator;
pub mod batch_config;
pub mod cancellation;
pub mod orchestrator;
pub mod parameter_grid;
pub mod record;
