//! Threshold configuration: the fixed constants driving automation.

use serde::{Deserialize, Serialize};

use crate::device::DeviceStatus;
use crate::error::ValidationError;

/// Automation thresholds, fixed at startup.
///
/// `lamp_on` and `lamp_off` bound the lamp's hysteresis band on the raw
/// light-sensor level; `temp_max` is the alarm threshold in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub lamp_on: u16,
    pub lamp_off: u16,
    pub temp_max: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            lamp_on: 40_000,
            lamp_off: 30_000,
            temp_max: 30.0,
        }
    }
}

impl ThresholdConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidThresholds`] when the hysteresis band
    /// is empty or inverted.
    pub fn new(lamp_on: u16, lamp_off: u16, temp_max: f64) -> Result<Self, ValidationError> {
        let config = Self {
            lamp_on,
            lamp_off,
            temp_max,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that `lamp_on > lamp_off`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidThresholds`] otherwise.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lamp_on <= self.lamp_off {
            return Err(ValidationError::InvalidThresholds {
                lamp_on: self.lamp_on,
                lamp_off: self.lamp_off,
            });
        }
        Ok(())
    }

    /// Next lamp status for `light_level`, or `None` when the lamp must stay put.
    ///
    /// Readings inside `[lamp_off, lamp_on]` never cause a transition.
    #[must_use]
    pub fn lamp_transition(&self, current: DeviceStatus, light_level: u16) -> Option<DeviceStatus> {
        match current {
            DeviceStatus::Off if light_level > self.lamp_on => Some(DeviceStatus::On),
            DeviceStatus::On if light_level < self.lamp_off => Some(DeviceStatus::Off),
            _ => None,
        }
    }

    /// Level-triggered alarm condition. Strictly greater than, no dead band.
    #[must_use]
    pub fn alarm_for(&self, temperature: f64) -> bool {
        temperature > self.temp_max
    }
}
