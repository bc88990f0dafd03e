use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::topology::node::NodeId;

/// Tag describing why `source` points at `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeRelation {
    DependsOn,
    Calls,
    Replicates,
    Monitors,
    Other(String),
}

impl EdgeRelation {
    pub fn as_str(&self) -> &str {
        match self {
            EdgeRelation::DependsOn => "depends_on",
            EdgeRelation::Calls => "calls",
            EdgeRelation::Replicates => "replicates",
            EdgeRelation::Monitors => "monitors",
            EdgeRelation::Other(tag) => tag,
        }
    }
}

impl From<String> for EdgeRelation {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "depends_on" => EdgeRelation::DependsOn,
            "calls" => EdgeRelation::Calls,
            "replicates" => EdgeRelation::Replicates,
            "monitors" => EdgeRelation::Monitors,
            _ => EdgeRelation::Other(tag),
        }
    }
}

impl From<EdgeRelation> for String {
    fn from(relation: EdgeRelation) -> Self {
        relation.as_str().to_string()
    }
}

impl fmt::Display for EdgeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge. Failures travel from `source` to `target` only.
///
/// Parallel edges between the same pair and self-loops are both allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: EdgeRelation,
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Edge {
    pub fn new(source: i64, target: i64, relation: EdgeRelation) -> Self {
        Edge { source: NodeId(source), target: NodeId(target), relation, attributes: serde_json::Map::new() }
    }
}
