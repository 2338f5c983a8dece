//! Device: a named relay-style output (fan, lamp, heater, …) and its status.
//!
//! The physical output handle itself lives in the application layer; the
//! domain only knows the name and the last commanded level.

mod status;

pub use status::DeviceStatus;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Name of the automation-owned lamp device.
pub const LAMP: &str = "lamp";

/// Validated, non-empty device identifier used in URLs and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceName(String);

impl DeviceName {
    /// Validate and wrap a device name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceName`] when `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyDeviceName);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceName> for String {
    fn from(name: DeviceName) -> Self {
        name.0
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time view of a device, as returned by listings and commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: DeviceName,
    pub status: DeviceStatus,
}
