use serde::{Deserialize, Serialize};

/// Column order of the result table.
pub const RECORD_COLUMNS: [&str; 8] =
    ["trial_id", "p_node", "capacity", "recovery_time", "failed_nodes", "user_impact_pct", "avg_wait", "max_wait"];

/// One row of the result table, created once per trial and never modified.
///
/// Field order matches [`RECORD_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    /// 1-based, contiguous within a batch.
    pub trial_id: u64,
    pub p_node: f64,
    pub capacity: usize,
    pub recovery_time: u32,
    pub failed_nodes: usize,

    /// Share of user-category nodes that failed, in `[0, 100]`.
    pub user_impact_pct: f64,
    pub avg_wait: f64,
    pub max_wait: f64,
}
