use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node, unique within one topology.
///
/// The reference data numbers nodes from 1, but nothing here relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of infrastructure entity a node stands for.
///
/// Unknown tags are preserved verbatim in `Other` so that a topology produced by a newer
/// generator still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeCategory {
    Service,
    DataStore,
    CloudRegion,
    EdgeDevice,
    Model,
    Dataset,
    User,
    Other(String),
}

impl NodeCategory {
    pub fn as_str(&self) -> &str {
        match self {
            NodeCategory::Service => "service",
            NodeCategory::DataStore => "data_store",
            NodeCategory::CloudRegion => "cloud_region",
            NodeCategory::EdgeDevice => "edge_device",
            NodeCategory::Model => "model",
            NodeCategory::Dataset => "dataset",
            NodeCategory::User => "user",
            NodeCategory::Other(tag) => tag,
        }
    }
}

impl From<&str> for NodeCategory {
    fn from(tag: &str) -> Self {
        match tag {
            "service" => NodeCategory::Service,
            "data_store" => NodeCategory::DataStore,
            "cloud_region" => NodeCategory::CloudRegion,
            "edge_device" => NodeCategory::EdgeDevice,
            "model" => NodeCategory::Model,
            "dataset" => NodeCategory::Dataset,
            "user" => NodeCategory::User,
            other => NodeCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeCategory {
    fn from(tag: String) -> Self {
        NodeCategory::from(tag.as_str())
    }
}

impl From<NodeCategory> for String {
    fn from(category: NodeCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vertex of the dependency graph. Immutable once the topology is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub category: NodeCategory,

    /// Any further keys of the input record, carried along untouched.
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    pub fn new(id: i64, label: impl Into<String>, category: NodeCategory) -> Self {
        Node { id: NodeId(id), label: label.into(), category, attributes: serde_json::Map::new() }
    }
}
