use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::api::batch_config_dto::BatchConfigDto;
use crate::api::topology_dto::TopologyDto;
use crate::domain::monte_carlo::batch_config::BatchConfig;
use crate::domain::topology::topology::Topology;
use crate::error::Result;

/// Reads the file at `path` and deserializes its JSON content into `T`.
///
/// Fails with `Error::IoError` if the file cannot be read and with
/// `Error::DeserializationError` if the JSON does not match `T`.
pub fn parse_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let data = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads and validates a topology document.
pub fn load_topology(path: impl AsRef<Path>) -> Result<Topology> {
    let path = path.as_ref();
    let dto: TopologyDto = parse_json_file(path)?;
    log::info!("Read topology '{}': {} nodes, {} edges.", path.display(), dto.nodes.len(), dto.edges.len());

    Ok(Topology::try_from(dto)?)
}

/// Loads a batch configuration. Keys missing from the file take their default values.
pub fn load_batch_config(path: impl AsRef<Path>) -> Result<BatchConfig> {
    let path = path.as_ref();
    let dto: BatchConfigDto = parse_json_file(path)?;
    log::info!("Read batch configuration '{}'.", path.display());

    Ok(BatchConfig::from_dto(dto)?)
}
