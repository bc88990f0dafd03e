use rand::Rng;
use rand_distr::{Distribution, Exp};
use serde::Serialize;
use std::collections::VecDeque;

use crate::domain::simulator::events::{EventQueue, QueueEvent};
use crate::error::ParameterError;

/// Wait-time statistics of one queue trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QueueTrialResult {
    /// Mean time requests spent queued before service started. 0 if none started.
    pub avg_wait: f64,

    /// Longest time a request spent queued before service started. 0 if none started.
    pub max_wait: f64,

    /// Requests whose service finished before the horizon.
    pub completed: u64,

    /// Always 0: the waiting room is unbounded and no request is ever rejected.
    pub dropped: u64,

    /// Requests generated before the horizon.
    pub arrivals: u64,
}

/// Running wait-time accumulator.
#[derive(Debug, Default)]
struct WaitStats {
    count: u64,
    sum: f64,
    max: f64,
}

impl WaitStats {
    fn record(&mut self, wait: f64) {
        self.count += 1;
        self.sum += wait;
        self.max = self.max.max(wait);
    }

    fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.sum / self.count as f64 }
    }
}

/// Simulates an M/M/c queue on a virtual clock running from 0 to `sim_time`.
///
/// Requests arrive as a Poisson process with rate `arrival_rate` and are served FIFO by
/// `capacity` identical servers, each with exponential service times of rate
/// `service_rate`. The waiting room is unbounded.
///
/// Only events strictly before `sim_time` are processed: a request arriving at or after
/// the horizon is never generated, its wait is recorded when it enters service, and it
/// counts as completed only if its service ends before the horizon.
pub fn simulate_queue<R: Rng + ?Sized>(
    arrival_rate: f64,
    service_rate: f64,
    capacity: usize,
    sim_time: f64,
    rng: &mut R,
) -> Result<QueueTrialResult, ParameterError> {
    let arrival_rate = ParameterError::check_positive("arrival_rate", arrival_rate)?;
    let service_rate = ParameterError::check_positive("service_rate", service_rate)?;
    let sim_time = ParameterError::check_positive("sim_time", sim_time)?;
    if capacity == 0 {
        return Err(ParameterError::NonPositive { name: "capacity", value: 0.0 });
    }

    let inter_arrival =
        Exp::new(arrival_rate).map_err(|_| ParameterError::NonPositive { name: "arrival_rate", value: arrival_rate })?;
    let service =
        Exp::new(service_rate).map_err(|_| ParameterError::NonPositive { name: "service_rate", value: service_rate })?;

    let mut events = EventQueue::new();
    let mut waiting: VecDeque<f64> = VecDeque::new();
    let mut busy = 0usize;
    let mut waits = WaitStats::default();
    let mut completed = 0u64;
    let mut arrivals = 0u64;

    events.schedule(inter_arrival.sample(rng), QueueEvent::Arrival);

    while let Some(scheduled) = events.pop_earliest() {
        let now = scheduled.time();
        if now >= sim_time {
            break;
        }

        match scheduled.event() {
            QueueEvent::Arrival => {
                arrivals += 1;
                events.schedule(now + inter_arrival.sample(rng), QueueEvent::Arrival);

                if busy < capacity {
                    busy += 1;
                    waits.record(0.0);
                    events.schedule(now + service.sample(rng), QueueEvent::Departure);
                } else {
                    waiting.push_back(now);
                }
            }
            QueueEvent::Departure => {
                completed += 1;

                // The freed server goes straight to the head of the line, if any.
                match waiting.pop_front() {
                    Some(arrived_at) => {
                        waits.record(now - arrived_at);
                        events.schedule(now + service.sample(rng), QueueEvent::Departure);
                    }
                    None => busy -= 1,
                }
            }
        }
    }

    log::trace!(
        "Queue trial finished: {} arrivals, {} completed, {} still queued at horizon {}.",
        arrivals,
        completed,
        waiting.len(),
        sim_time
    );

    Ok(QueueTrialResult { avg_wait: waits.mean(), max_wait: waits.max, completed, dropped: 0, arrivals })
}
