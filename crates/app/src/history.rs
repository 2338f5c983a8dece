//! Rolling sample history: the last [`HISTORY_CAPACITY`] polls, oldest first.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use coopctl_domain::sample::{HistorySnapshot, SensorSample};

/// Number of samples retained.
pub const HISTORY_CAPACITY: usize = 20;

/// Bounded FIFO of sensor samples.
///
/// Eviction and append happen under one lock, so a snapshot never sees more
/// than [`HISTORY_CAPACITY`] entries or a half-rotated buffer.
pub struct HistoryBuffer {
    samples: Mutex<VecDeque<SensorSample>>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self {
            samples: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        }
    }
}

impl HistoryBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<SensorSample>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `sample`, dropping the oldest entry first when full.
    pub fn record(&self, sample: SensorSample) {
        let mut samples = self.lock();
        if samples.len() == HISTORY_CAPACITY {
            samples.pop_front();
        }
        samples.push_back(sample);
    }

    /// Index-aligned columns, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> HistorySnapshot {
        self.lock().iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
