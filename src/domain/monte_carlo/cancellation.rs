use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Coarse stop signal for a running batch, checked before each trial starts.
///
/// Clones share the same flag. Trials already running are allowed to finish.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
