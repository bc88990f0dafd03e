use rand::Rng;
use std::collections::BTreeSet;

use crate::domain::topology::node::NodeId;
use crate::domain::topology::topology::Topology;
use crate::error::ParameterError;

/// Outcome of one cascading-failure trial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialFailureResult {
    /// Number of propagation rounds executed until a round produced no new failure.
    pub recovery_time: u32,

    /// Every node that failed, either initially or through propagation.
    pub failed: BTreeSet<NodeId>,
}

/// Newly failed nodes per round. `rounds[0]` holds the initial failures, `rounds[k]`
/// the nodes first reached in round `k`. Always `recovery_time + 1` entries long.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationTrace {
    pub rounds: Vec<Vec<NodeId>>,
}

impl PropagationTrace {
    /// Failed set as it stood after round `round`.
    pub fn failed_after(&self, round: usize) -> BTreeSet<NodeId> {
        self.rounds.iter().take(round + 1).flatten().copied().collect()
    }
}

/// Runs one cascading-failure trial over `topology`.
///
/// Every node fails initially with probability `p_node`. Each round then walks the
/// outgoing edges of the nodes that failed in the previous round and fails each target
/// that is still healthy with probability `p_propagate`, one draw per edge. Failures are
/// permanent. The cascade stops after the first round that adds nothing, and that round
/// still counts towards `recovery_time`.
pub fn propagate<R: Rng + ?Sized>(
    topology: &Topology,
    p_node: f64,
    p_propagate: f64,
    rng: &mut R,
) -> Result<TrialFailureResult, ParameterError> {
    let (p_node, p_propagate) = validate(p_node, p_propagate)?;
    Ok(cascade(topology, p_node, p_propagate, rng, |_| {}))
}

/// Same as [`propagate`], also returning the nodes that failed in each round.
///
/// Given the same generator state it draws exactly the same numbers as [`propagate`].
pub fn propagate_traced<R: Rng + ?Sized>(
    topology: &Topology,
    p_node: f64,
    p_propagate: f64,
    rng: &mut R,
) -> Result<(TrialFailureResult, PropagationTrace), ParameterError> {
    let (p_node, p_propagate) = validate(p_node, p_propagate)?;
    let mut trace = PropagationTrace::default();
    let result = cascade(topology, p_node, p_propagate, rng, |newly_failed| {
        trace.rounds.push(newly_failed.iter().map(|&pos| topology.id_at(pos)).collect());
    });
    Ok((result, trace))
}

fn validate(p_node: f64, p_propagate: f64) -> Result<(f64, f64), ParameterError> {
    Ok((ParameterError::check_probability("p_node", p_node)?, ParameterError::check_probability("p_propagate", p_propagate)?))
}

/// `on_round` sees the initial failures first, then the additions of every round.
fn cascade<R: Rng + ?Sized>(
    topology: &Topology,
    p_node: f64,
    p_propagate: f64,
    rng: &mut R,
    mut on_round: impl FnMut(&[usize]),
) -> TrialFailureResult {
    let mut failed = vec![false; topology.node_count()];

    let mut frontier: Vec<usize> = Vec::new();
    for (pos, is_failed) in failed.iter_mut().enumerate() {
        if rng.random_bool(p_node) {
            *is_failed = true;
            frontier.push(pos);
        }
    }
    on_round(&frontier);

    let mut recovery_time = 0;
    while !frontier.is_empty() {
        recovery_time += 1;
        let mut next_frontier = Vec::new();
        for &pos in &frontier {
            for &target in topology.outgoing(pos) {
                // A node reached from two frontier members is already marked on the second visit.
                if !failed[target] && rng.random_bool(p_propagate) {
                    failed[target] = true;
                    next_frontier.push(target);
                }
            }
        }
        on_round(&next_frontier);
        frontier = next_frontier;
    }

    let failed = failed.iter().enumerate().filter(|(_, is_failed)| **is_failed).map(|(pos, _)| topology.id_at(pos)).collect();

    TrialFailureResult { recovery_time, failed }
}
