use std::path::Path;

use crate::domain::monte_carlo::batch_config::BatchConfig;
use crate::domain::monte_carlo::orchestrator;
use crate::domain::monte_carlo::record::SimulationRecord;
use crate::error::Result;
use crate::loader::parser::{load_batch_config, load_topology};

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a topology and an optional batch configuration from disk and runs the sweep.
///
/// Without `config_path` the default sweep is used. Logging is left to the caller.
pub fn run_batch_from_files(graph_path: impl AsRef<Path>, config_path: Option<&Path>) -> Result<Vec<SimulationRecord>> {
    let topology = load_topology(graph_path)?;
    let config = match config_path {
        Some(path) => load_batch_config(path)?,
        None => BatchConfig::default(),
    };

    orchestrator::run(&topology, &config)
}
