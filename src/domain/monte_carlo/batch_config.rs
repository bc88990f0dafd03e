use crate::api::batch_config_dto::BatchConfigDto;
use crate::domain::monte_carlo::parameter_grid::ParameterGrid;
use crate::error::ParameterError;

pub const DEFAULT_FAILURE_PROBS: [f64; 3] = [0.05, 0.1, 0.2];
pub const DEFAULT_CAPACITIES: [usize; 3] = [1, 2, 3];
pub const DEFAULT_N_SIMS: usize = 50;
pub const DEFAULT_P_PROPAGATE: f64 = 0.3;
pub const DEFAULT_ARRIVAL_RATE: f64 = 10.0;
pub const DEFAULT_SERVICE_RATE: f64 = 12.0;
pub const DEFAULT_QUEUE_HORIZON: f64 = 100.0;

/// Everything a sweep needs besides the topology.
///
/// Probabilities and rates are not checked here: the propagator and the queue simulator
/// validate their own inputs, so a bad value aborts the batch from the trial that used it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub grid: ParameterGrid,
    pub p_propagate: f64,
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub queue_horizon: f64,

    /// `None` draws a base seed from OS entropy when the batch starts.
    pub base_seed: Option<u64>,

    /// Worker count. `None` uses one worker per available core.
    pub threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            grid: ParameterGrid::new(DEFAULT_FAILURE_PROBS.to_vec(), DEFAULT_CAPACITIES.to_vec(), DEFAULT_N_SIMS),
            p_propagate: DEFAULT_P_PROPAGATE,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            service_rate: DEFAULT_SERVICE_RATE,
            queue_horizon: DEFAULT_QUEUE_HORIZON,
            base_seed: None,
            threads: None,
        }
    }
}

impl BatchConfig {
    /// Fills missing keys with the defaults and checks the batch-level settings.
    pub fn from_dto(dto: BatchConfigDto) -> Result<Self, ParameterError> {
        let defaults = BatchConfig::default();

        let n_sims = dto.n_sims.unwrap_or(defaults.grid.n_sims);
        if n_sims == 0 {
            return Err(ParameterError::NonPositive { name: "n_sims", value: 0.0 });
        }
        if dto.threads == Some(0) {
            return Err(ParameterError::NonPositive { name: "threads", value: 0.0 });
        }
        let queue_horizon = ParameterError::check_positive("queue_horizon", dto.queue_horizon.unwrap_or(defaults.queue_horizon))?;

        Ok(BatchConfig {
            grid: ParameterGrid::new(
                dto.failure_probs.unwrap_or(defaults.grid.failure_probs),
                dto.capacities.unwrap_or(defaults.grid.capacities),
                n_sims,
            ),
            p_propagate: dto.p_propagate.unwrap_or(defaults.p_propagate),
            arrival_rate: dto.arrival_rate.unwrap_or(defaults.arrival_rate),
            service_rate: dto.service_rate.unwrap_or(defaults.service_rate),
            queue_horizon,
            base_seed: dto.base_seed,
            threads: dto.threads,
        })
    }
}
