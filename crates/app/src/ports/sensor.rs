//! Sensor port: the "read current readings" capability of the sensor bus.

use std::future::Future;
use std::sync::Arc;

use coopctl_domain::error::CoopError;
use coopctl_domain::sample::SensorReading;

/// Source of ambient readings (temperature/humidity/pressure module plus
/// the light-dependent resistor).
pub trait SensorSource: Send + Sync {
    /// Take one reading from every channel.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::Sensor`] when the bus cannot be read. There is no
    /// fallback value; callers fail the current request.
    fn read(&self) -> impl Future<Output = Result<SensorReading, CoopError>> + Send;
}

impl<T: SensorSource> SensorSource for Arc<T> {
    fn read(&self) -> impl Future<Output = Result<SensorReading, CoopError>> + Send {
        (**self).read()
    }
}
