use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::domain::monte_carlo::batch_config::BatchConfig;
use crate::domain::monte_carlo::cancellation::CancellationToken;
use crate::domain::monte_carlo::parameter_grid::GridPosition;
use crate::domain::monte_carlo::record::SimulationRecord;
use crate::domain::simulator::failure_propagator::propagate;
use crate::domain::simulator::queue_simulator::simulate_queue;
use crate::domain::simulator::rng::{FAILURE_STREAM, QUEUE_STREAM, entropy_seed, trial_rng};
use crate::domain::topology::node::{NodeCategory, NodeId};
use crate::domain::topology::topology::Topology;
use crate::error::{Error, ParameterError, Result};

/// Runs the whole sweep described by `config` over `topology`.
pub fn run(topology: &Topology, config: &BatchConfig) -> Result<Vec<SimulationRecord>> {
    MonteCarloRunner::new(topology, config).run()
}

/// Percentage of `user_nodes` contained in `failed`. 0 when there are no user nodes.
pub fn user_impact_pct(failed: &BTreeSet<NodeId>, user_nodes: &BTreeSet<NodeId>) -> f64 {
    if user_nodes.is_empty() {
        return 0.0;
    }
    let impacted = user_nodes.intersection(failed).count();
    impacted as f64 / user_nodes.len() as f64 * 100.0
}

/// Drives a Monte Carlo sweep on a fixed-size worker pool.
///
/// Each grid position is an independent trial with its own random streams derived from
/// `(base_seed, trial_id)`. Workers write their record into a slot reserved for that
/// trial id, so the result comes back in trial-id order however the trials were
/// scheduled. The first failing trial aborts the batch.
#[derive(Debug)]
pub struct MonteCarloRunner<'a> {
    topology: &'a Topology,
    config: &'a BatchConfig,
    cancellation: CancellationToken,
}

impl<'a> MonteCarloRunner<'a> {
    pub fn new(topology: &'a Topology, config: &'a BatchConfig) -> Self {
        MonteCarloRunner { topology, config, cancellation: CancellationToken::new() }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn run(&self) -> Result<Vec<SimulationRecord>> {
        let grid = &self.config.grid;
        if grid.is_empty() {
            log::info!("Parameter grid is empty. Nothing to simulate.");
            return Ok(Vec::new());
        }

        let base_seed = match self.config.base_seed {
            Some(seed) => seed,
            None => {
                let seed = entropy_seed();
                log::info!("No base seed configured. Drew {} from OS entropy; pass it back to replay this batch.", seed);
                seed
            }
        };

        let pool = self.build_pool()?;
        log::info!(
            "Starting sweep of {} trials ({} failure probabilities x {} capacities x {} repetitions) on {} workers, base seed {}.",
            grid.len(),
            grid.failure_probs.len(),
            grid.capacities.len(),
            grid.n_sims,
            pool.current_num_threads(),
            base_seed
        );

        let user_nodes = self.topology.nodes_by_category(&NodeCategory::User);
        let positions: Vec<GridPosition> = grid.positions().collect();
        let mut slots: Vec<Option<SimulationRecord>> = vec![None; positions.len()];
        let completed = AtomicUsize::new(0);
        let started = Instant::now();

        let outcome = pool.install(|| {
            slots.par_iter_mut().zip(positions.par_iter()).try_for_each(|(slot, position)| {
                if self.cancellation.is_cancelled() {
                    return Err(Error::Cancelled { completed: completed.load(Ordering::Relaxed) });
                }
                *slot = Some(self.run_trial(position, base_seed, &user_nodes)?);
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })
        });

        match outcome {
            Err(Error::Cancelled { completed }) => {
                log::warn!("Sweep cancelled after {} of {} trials.", completed, grid.len());
                return Err(Error::Cancelled { completed });
            }
            Err(e) => {
                log::error!("Sweep aborted: {}", e);
                return Err(e);
            }
            Ok(()) => {}
        }

        let records: Vec<SimulationRecord> = slots.into_iter().flatten().collect();
        log::info!("Sweep finished: {} records in {:.2?}.", records.len(), started.elapsed());

        Ok(records)
    }

    /// Runs one trial. The propagator and the queue simulator share nothing, so they run
    /// side by side, each on its own stream of the trial seed.
    fn run_trial(&self, position: &GridPosition, base_seed: u64, user_nodes: &BTreeSet<NodeId>) -> Result<SimulationRecord> {
        let GridPosition { trial_id, p_node, capacity, .. } = *position;
        let config = self.config;

        let mut failure_rng = trial_rng(base_seed, trial_id, FAILURE_STREAM);
        let mut queue_rng = trial_rng(base_seed, trial_id, QUEUE_STREAM);

        let (failure, queue) = rayon::join(
            || propagate(self.topology, p_node, config.p_propagate, &mut failure_rng),
            || simulate_queue(config.arrival_rate, config.service_rate, capacity, config.queue_horizon, &mut queue_rng),
        );

        let attach = |source: ParameterError| Error::Trial { trial_id, p_node, capacity, source };
        let failure = failure.map_err(attach)?;
        let queue = queue.map_err(attach)?;

        log::debug!(
            "Trial {} (p_node={}, capacity={}): {} failed in {} rounds, avg wait {:.4}.",
            trial_id,
            p_node,
            capacity,
            failure.failed.len(),
            failure.recovery_time,
            queue.avg_wait
        );

        Ok(SimulationRecord {
            trial_id,
            p_node,
            capacity,
            recovery_time: failure.recovery_time,
            failed_nodes: failure.failed.len(),
            user_impact_pct: user_impact_pct(&failure.failed, user_nodes),
            avg_wait: queue.avg_wait,
            max_wait: queue.max_wait,
        })
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool> {
        let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("trial-worker-{}", i));
        if let Some(threads) = self.config.threads {
            builder = builder.num_threads(threads);
        }
        builder.build().map_err(|e| Error::WorkerPool(e.to_string()))
    }
}
