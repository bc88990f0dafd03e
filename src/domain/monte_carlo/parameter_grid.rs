/// Iteration space of a sweep: failure probabilities × capacities × repetitions.
///
/// Trial ids are assigned in a fixed order, probability outermost, capacity next,
/// repetition innermost, starting at 1. The id of a trial is therefore a pure function
/// of its grid position and can be computed in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    pub failure_probs: Vec<f64>,
    pub capacities: Vec<usize>,
    pub n_sims: usize,
}

/// One cell of the grid together with the trial id it is assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPosition {
    pub trial_id: u64,
    pub p_node: f64,
    pub capacity: usize,
    pub repetition: usize,
}

impl ParameterGrid {
    pub fn new(failure_probs: Vec<f64>, capacities: Vec<usize>, n_sims: usize) -> Self {
        ParameterGrid { failure_probs, capacities, n_sims }
    }

    /// Total number of trials.
    pub fn len(&self) -> usize {
        self.failure_probs.len() * self.capacities.len() * self.n_sims
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid position of `trial_id`, or `None` if the id is outside `1..=len()`.
    pub fn position(&self, trial_id: u64) -> Option<GridPosition> {
        if trial_id == 0 || trial_id > self.len() as u64 {
            return None;
        }
        let idx = (trial_id - 1) as usize;
        let repetition = idx % self.n_sims;
        let capacity = self.capacities[(idx / self.n_sims) % self.capacities.len()];
        let p_node = self.failure_probs[idx / (self.n_sims * self.capacities.len())];

        Some(GridPosition { trial_id, p_node, capacity, repetition })
    }

    /// All positions in trial-id order.
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.failure_probs
            .iter()
            .flat_map(move |&p_node| self.capacities.iter().map(move |&capacity| (p_node, capacity)))
            .flat_map(move |(p_node, capacity)| (0..self.n_sims).map(move |repetition| (p_node, capacity, repetition)))
            .zip(1u64..)
            .map(|((p_node, capacity, repetition), trial_id)| GridPosition { trial_id, p_node, capacity, repetition })
    }
}
