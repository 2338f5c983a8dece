//! Device status: the binary level last driven onto an output.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Commanded level of a relay-style output.
///
/// There is no pending or unknown state: the status always mirrors the last
/// value written to the physical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    On,
    #[default]
    Off,
}

impl DeviceStatus {
    /// Logic level to drive onto the output pin.
    #[must_use]
    pub fn level(self) -> bool {
        matches!(self, Self::On)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl FromStr for DeviceStatus {
    type Err = ValidationError;

    /// Parse a command action. Only the exact strings `on` and `off` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(ValidationError::InvalidAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
