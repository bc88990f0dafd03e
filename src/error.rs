use thiserror::Error;

use crate::domain::topology::node::NodeId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write CSV output: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid topology: {0}")]
    Topology(#[from] TopologyError),

    #[error("Invalid parameter: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Trial {trial_id} (p_node={p_node}, capacity={capacity}) aborted the batch: {source}")]
    Trial {
        trial_id: u64,
        p_node: f64,
        capacity: usize,
        #[source]
        source: ParameterError,
    },

    #[error("Batch cancelled after {completed} completed trials")]
    Cancelled { completed: usize },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Malformed input graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Edge {from} -> {to} references node {missing}, which is not in the node set")]
    DanglingEdge { from: NodeId, to: NodeId, missing: NodeId },

    #[error("Node id {0} appears more than once")]
    DuplicateNode(NodeId),

    #[error("Node id {0} is not part of the topology")]
    UnknownNode(NodeId),
}

/// Out-of-range or missing simulation parameter. Never retried: it is a caller bug.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

impl ParameterError {
    /// Accepts `value` if it is a finite probability.
    pub fn check_probability(name: &'static str, value: f64) -> std::result::Result<f64, ParameterError> {
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(ParameterError::ProbabilityOutOfRange { name, value })
        }
    }

    /// Accepts `value` if it is finite and strictly greater than zero.
    pub fn check_positive(name: &'static str, value: f64) -> std::result::Result<f64, ParameterError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ParameterError::NonPositive { name, value })
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
