use serde::{Deserialize, Serialize};

/// Graph document as written by the topology generator.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TopologyDto {
    pub nodes: Vec<NodeDto>,
    pub edges: Vec<EdgeDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NodeDto {
    pub id: i64,

    #[serde(default)]
    pub label: String,

    pub category: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EdgeDto {
    pub source: i64,
    pub target: i64,

    #[serde(rename = "type")]
    pub typ: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
