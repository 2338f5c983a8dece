//! Response shapes produced by the controller for its callers.

use serde::{Deserialize, Serialize};

use crate::device::DeviceStatus;
use crate::sample::SensorReading;

/// Outcome of one poll: the rounded reading plus the lamp status after automation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollReport {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub altitude: f64,
    pub ldr: u16,
    pub lamp_auto: DeviceStatus,
}

impl PollReport {
    #[must_use]
    pub fn new(reading: &SensorReading, lamp: DeviceStatus) -> Self {
        Self {
            temperature: reading.temperature,
            humidity: reading.humidity,
            pressure: reading.pressure,
            altitude: reading.altitude,
            ldr: reading.light_level,
            lamp_auto: lamp,
        }
    }
}

/// Liveness summary of the controller node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub status: String,
    pub ip: String,
    pub device_count: usize,
}

impl NodeStatus {
    #[must_use]
    pub fn online(ip: impl Into<String>, device_count: usize) -> Self {
        Self {
            status: "online".to_string(),
            ip: ip.into(),
            device_count,
        }
    }
}
