//! Automation engine: applies threshold rules to each fresh sensor reading.
//!
//! Two rules run on every poll:
//! - the lamp follows the light level through a hysteresis band, and
//! - the alarm flag is recomputed from the temperature with no dead band.
//!
//! Both are level-triggered: they look only at the current reading and the
//! current lamp status, never at the previous reading.

use coopctl_domain::device::{DeviceStatus, LAMP};
use coopctl_domain::error::CoopError;
use coopctl_domain::sample::SensorReading;
use coopctl_domain::threshold::ThresholdConfig;

use crate::alarm::AlarmFlag;
use crate::device_registry::DeviceRegistry;
use crate::ports::OutputPin;

/// Threshold-driven automation over the lamp and the alarm flag.
pub struct AutomationEngine {
    thresholds: ThresholdConfig,
    alarm: AlarmFlag,
}

impl AutomationEngine {
    /// Create an engine writing into `alarm`.
    pub fn new(thresholds: ThresholdConfig, alarm: AlarmFlag) -> Self {
        Self { thresholds, alarm }
    }

    /// Run both rules for `reading`. Returns the lamp status afterwards.
    ///
    /// # Errors
    ///
    /// Propagates [`AutomationEngine::apply_lamp`] failures. The alarm flag is
    /// updated before the lamp, so it is current even when the lamp fails.
    pub fn apply<O: OutputPin>(
        &self,
        registry: &DeviceRegistry<O>,
        reading: &SensorReading,
    ) -> Result<DeviceStatus, CoopError> {
        self.apply_alarm(reading.temperature);
        self.apply_lamp(registry, reading.light_level)
    }

    /// Step the lamp's hysteresis state machine for `light_level`.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::NotFound`] if no lamp is bound, or
    /// [`CoopError::Output`] when switching the lamp fails.
    pub fn apply_lamp<O: OutputPin>(
        &self,
        registry: &DeviceRegistry<O>,
        light_level: u16,
    ) -> Result<DeviceStatus, CoopError> {
        let mut switched = None;
        let status = registry.update_with(LAMP, |current| {
            let next = self.thresholds.lamp_transition(current, light_level);
            switched = next;
            next
        })?;
        if let Some(next) = switched {
            tracing::info!(light_level, lamp = %next, "lamp switched by automation");
        }
        Ok(status)
    }

    /// Recompute the alarm flag from `temperature`. Returns the new level.
    pub fn apply_alarm(&self, temperature: f64) -> bool {
        let raised = self.thresholds.alarm_for(temperature);
        let previous = self.alarm.set(raised);
        if previous != raised {
            if raised {
                tracing::info!(
                    temperature,
                    temp_max = self.thresholds.temp_max,
                    "temperature alarm raised"
                );
            } else {
                tracing::info!(temperature, "temperature alarm cleared");
            }
        }
        raised
    }
}
