//! Virtual GPIO output.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use coopctl_app::ports::OutputPin;
use coopctl_domain::error::CoopError;

/// Error returned by a [`VirtualPin`] in fault mode.
#[derive(Debug, thiserror::Error)]
#[error("virtual pin {0} is faulted")]
pub struct PinFault(pub u8);

/// A simulated digital output on a numbered pin.
#[derive(Debug)]
pub struct VirtualPin {
    pin: u8,
    level: AtomicBool,
    writes: AtomicUsize,
    faulted: AtomicBool,
}

impl VirtualPin {
    #[must_use]
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            level: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
            faulted: AtomicBool::new(false),
        }
    }

    /// Last level successfully written.
    #[must_use]
    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following write fail (or succeed again).
    pub fn set_fault(&self, faulted: bool) {
        self.faulted.store(faulted, Ordering::SeqCst);
    }
}

impl OutputPin for VirtualPin {
    fn write(&self, level: bool) -> Result<(), CoopError> {
        if self.faulted.load(Ordering::SeqCst) {
            return Err(CoopError::Output(Box::new(PinFault(self.pin))));
        }
        self.level.store(level, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(pin = self.pin, level, "virtual pin written");
        Ok(())
    }
}
