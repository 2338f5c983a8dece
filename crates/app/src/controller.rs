//! Controller: the composition root of the core, shared by every request.
//!
//! One [`Controller`] is built at startup and lives for the whole process.
//! Request handlers and the alarm signaler receive handles to it (or to its
//! [`AlarmFlag`]) instead of reaching for globals.

use coopctl_domain::device::{Device, DeviceStatus, LAMP};
use coopctl_domain::error::{CoopError, ValidationError};
use coopctl_domain::flock::FlockMetrics;
use coopctl_domain::report::{NodeStatus, PollReport};
use coopctl_domain::sample::HistorySnapshot;
use coopctl_domain::threshold::ThresholdConfig;
use coopctl_domain::time;

use crate::alarm::AlarmFlag;
use crate::automation_engine::AutomationEngine;
use crate::device_registry::DeviceRegistry;
use crate::flock_aggregator::FlockAggregator;
use crate::history::HistoryBuffer;
use crate::ports::{FlockFeed, OutputPin, SensorSource};

/// Owns the device registry, automation, history and flock aggregator.
pub struct Controller<O, S, F> {
    registry: DeviceRegistry<O>,
    automation: AutomationEngine,
    history: HistoryBuffer,
    aggregator: FlockAggregator<F>,
    sensor: S,
    alarm: AlarmFlag,
    advertise_ip: String,
}

impl<O, S, F> Controller<O, S, F>
where
    O: OutputPin,
    S: SensorSource,
    F: FlockFeed,
{
    /// Assemble the controller.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::Validation`] when the thresholds are inconsistent
    /// or when no `lamp` device is bound (the lamp is automation-owned).
    pub fn new(
        registry: DeviceRegistry<O>,
        thresholds: ThresholdConfig,
        sensor: S,
        feed: F,
        advertise_ip: impl Into<String>,
    ) -> Result<Self, CoopError> {
        thresholds.validate()?;
        if !registry.contains(LAMP) {
            return Err(ValidationError::MissingDevice(LAMP).into());
        }
        let alarm = AlarmFlag::new();
        Ok(Self {
            registry,
            automation: AutomationEngine::new(thresholds, alarm.clone()),
            history: HistoryBuffer::new(),
            aggregator: FlockAggregator::new(feed),
            sensor,
            alarm,
            advertise_ip: advertise_ip.into(),
        })
    }

    /// Handle to the alarm flag, for the signaler task.
    #[must_use]
    pub fn alarm_flag(&self) -> AlarmFlag {
        self.alarm.clone()
    }

    /// Read the sensors, run automation, record history.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::Sensor`] when the sensor bank cannot be read (no
    /// reading is synthesised), or [`CoopError::Output`] when the lamp
    /// cannot be switched.
    #[tracing::instrument(skip(self))]
    pub async fn poll(&self) -> Result<PollReport, CoopError> {
        let reading = self.sensor.read().await?.rounded();
        let lamp = self.automation.apply(&self.registry, &reading)?;
        self.history
            .record(reading.to_sample(time::clock_label(&time::now())));
        Ok(PollReport::new(&reading, lamp))
    }

    #[must_use]
    pub fn history(&self) -> HistorySnapshot {
        self.history.snapshot()
    }

    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
        self.registry.list()
    }

    /// # Errors
    ///
    /// Returns [`CoopError::NotFound`] for an unknown device.
    pub fn device_status(&self, name: &str) -> Result<DeviceStatus, CoopError> {
        self.registry.status(name)
    }

    /// # Errors
    ///
    /// See [`DeviceRegistry::set_status`].
    pub fn command(&self, name: &str, action: &str) -> Result<DeviceStatus, CoopError> {
        self.registry.set_status(name, action)
    }

    pub async fn flock(&self) -> FlockMetrics {
        self.aggregator.fetch().await
    }

    #[must_use]
    pub fn node_status(&self) -> NodeStatus {
        NodeStatus::online(self.advertise_ip.clone(), self.registry.len())
    }
}
