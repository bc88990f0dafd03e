use serde::{Deserialize, Serialize};

/// Sweep settings as read from a configuration file. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchConfigDto {
    pub failure_probs: Option<Vec<f64>>,
    pub capacities: Option<Vec<usize>>,
    pub n_sims: Option<usize>,
    pub p_propagate: Option<f64>,
    pub arrival_rate: Option<f64>,
    pub service_rate: Option<f64>,
    pub queue_horizon: Option<f64>,
    pub base_seed: Option<u64>,
    pub threads: Option<usize>,
}
