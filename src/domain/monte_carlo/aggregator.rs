use serde::Serialize;
use std::collections::HashMap;

use crate::domain::monte_carlo::record::SimulationRecord;

/// Column order of the summary table.
pub const SUMMARY_COLUMNS: [&str; 8] = [
    "p_node",
    "capacity",
    "trials",
    "mean_recovery_time",
    "mean_failed_nodes",
    "mean_user_impact_pct",
    "mean_avg_wait",
    "mean_max_wait",
];

/// Record field a summary can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    PNode,
    Capacity,
}

/// Means over all records sharing the same group key values.
///
/// A key field is `None` when the summary was not grouped by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub p_node: Option<f64>,
    pub capacity: Option<usize>,
    pub trials: usize,
    pub mean_recovery_time: f64,
    pub mean_failed_nodes: f64,
    pub mean_user_impact_pct: f64,
    pub mean_avg_wait: f64,
    pub mean_max_wait: f64,
}

#[derive(Debug, Default)]
struct Sums {
    p_node: Option<f64>,
    capacity: Option<usize>,
    trials: usize,
    recovery_time: f64,
    failed_nodes: f64,
    user_impact_pct: f64,
    avg_wait: f64,
    max_wait: f64,
}

impl Sums {
    fn add(&mut self, record: &SimulationRecord) {
        self.trials += 1;
        self.recovery_time += f64::from(record.recovery_time);
        self.failed_nodes += record.failed_nodes as f64;
        self.user_impact_pct += record.user_impact_pct;
        self.avg_wait += record.avg_wait;
        self.max_wait += record.max_wait;
    }

    fn into_summary(self) -> GroupSummary {
        let n = self.trials as f64;
        GroupSummary {
            p_node: self.p_node,
            capacity: self.capacity,
            trials: self.trials,
            mean_recovery_time: self.recovery_time / n,
            mean_failed_nodes: self.failed_nodes / n,
            mean_user_impact_pct: self.user_impact_pct / n,
            mean_avg_wait: self.avg_wait / n,
            mean_max_wait: self.max_wait / n,
        }
    }
}

/// Groups `records` by the fields in `keys` and averages the numeric columns.
///
/// Groups are returned in the order their first record appears. With no keys every
/// record lands in a single group; with no records the result is empty.
pub fn aggregate(records: &[SimulationRecord], keys: &[GroupKey]) -> Vec<GroupSummary> {
    let by_p_node = keys.contains(&GroupKey::PNode);
    let by_capacity = keys.contains(&GroupKey::Capacity);

    let mut groups: Vec<Sums> = Vec::new();
    let mut lookup: HashMap<(Option<u64>, Option<usize>), usize> = HashMap::new();

    for record in records {
        let p_node = by_p_node.then_some(record.p_node);
        let capacity = by_capacity.then_some(record.capacity);

        let slot = *lookup.entry((p_node.map(f64::to_bits), capacity)).or_insert_with(|| {
            groups.push(Sums { p_node, capacity, ..Sums::default() });
            groups.len() - 1
        });
        groups[slot].add(record);
    }

    groups.into_iter().map(Sums::into_summary).collect()
}

/// Means per `(p_node, capacity)` combination.
pub fn summarize(records: &[SimulationRecord]) -> Vec<GroupSummary> {
    aggregate(records, &[GroupKey::PNode, GroupKey::Capacity])
}
