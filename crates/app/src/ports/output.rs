//! Output port: a single binary physical output (relay, buzzer, GPIO line).

use std::sync::Arc;

use coopctl_domain::error::CoopError;

/// Handle to one physical output line.
///
/// Writes are synchronous and expected to be fast (a GPIO register write).
/// Implementations must be idempotent: writing the same level twice is
/// harmless.
pub trait OutputPin: Send + Sync {
    /// Drive the output high (`true`) or low (`false`).
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::Output`] when the hardware rejects the write.
    fn write(&self, level: bool) -> Result<(), CoopError>;
}

impl<T: OutputPin + ?Sized> OutputPin for Arc<T> {
    fn write(&self, level: bool) -> Result<(), CoopError> {
        (**self).write(level)
    }
}

impl<T: OutputPin + ?Sized> OutputPin for Box<T> {
    fn write(&self, level: bool) -> Result<(), CoopError> {
        (**self).write(level)
    }
}
