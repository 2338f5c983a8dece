//! Virtual sensor bank: temperature/humidity/pressure module plus LDR.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use coopctl_app::ports::SensorSource;
use coopctl_domain::error::CoopError;
use coopctl_domain::sample::SensorReading;

/// Error returned by a [`VirtualSensorBank`] in fault mode.
#[derive(Debug, thiserror::Error)]
#[error("virtual sensor bank is not responding")]
pub struct SensorFault;

/// A simulated sensor bank holding the reading it will report next.
pub struct VirtualSensorBank {
    reading: Mutex<SensorReading>,
    faulted: AtomicBool,
}

impl Default for VirtualSensorBank {
    fn default() -> Self {
        Self::new(SensorReading {
            temperature: 26.5,
            humidity: 68.0,
            pressure: 1009.8,
            altitude: 29.4,
            light_level: 35_000,
        })
    }
}

impl VirtualSensorBank {
    #[must_use]
    pub fn new(reading: SensorReading) -> Self {
        Self {
            reading: Mutex::new(reading),
            faulted: AtomicBool::new(false),
        }
    }

    /// Replace the reading returned by the next reads.
    pub fn set(&self, reading: SensorReading) {
        *self.reading.lock().unwrap_or_else(PoisonError::into_inner) = reading;
    }

    /// Adjust only the light channel.
    pub fn set_light_level(&self, light_level: u16) {
        self.reading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .light_level = light_level;
    }

    /// Adjust only the temperature channel.
    pub fn set_temperature(&self, temperature: f64) {
        self.reading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .temperature = temperature;
    }

    #[must_use]
    pub fn current(&self) -> SensorReading {
        *self.reading.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every following read fail (or succeed again).
    pub fn set_fault(&self, faulted: bool) {
        self.faulted.store(faulted, Ordering::SeqCst);
    }
}

impl SensorSource for VirtualSensorBank {
    async fn read(&self) -> Result<SensorReading, CoopError> {
        if self.faulted.load(Ordering::SeqCst) {
            return Err(CoopError::Sensor(Box::new(SensorFault)));
        }
        Ok(self.current())
    }
}
