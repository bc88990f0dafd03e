pub mod events;
pub mod failure_propagator;
pub mod queue_simulator;
pub mod rng;
