//! Per-trial random streams.
//!
//! Nothing in the simulation draws from a process-wide generator. Every trial derives its
//! own seed from `(base_seed, trial_id)`, and each model inside the trial reads its own
//! ChaCha stream of that seed. A trial therefore sees the same numbers no matter which
//! worker runs it or in which order trials are scheduled.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Stream read by the failure propagator.
pub const FAILURE_STREAM: u64 = 0;

/// Stream read by the queue simulator.
pub const QUEUE_STREAM: u64 = 1;

/// SplitMix64 finaliser. Spreads neighbouring inputs over the whole `u64` range.
fn mix(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of trial `trial_id` within the batch seeded by `base_seed`.
pub fn trial_seed(base_seed: u64, trial_id: u64) -> u64 {
    mix(base_seed ^ mix(trial_id))
}

/// Generator for one model of one trial.
pub fn trial_rng(base_seed: u64, trial_id: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(trial_seed(base_seed, trial_id));
    rng.set_stream(stream);
    rng
}

/// Fresh base seed from OS entropy, used when a batch is not given one.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}
