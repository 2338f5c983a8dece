//! Sensor readings and the history samples derived from them.

use serde::{Deserialize, Serialize};

/// One reading of the ambient sensor bank.
///
/// `light_level` is the raw 16-bit light-dependent-resistor level; higher
/// means darker on the reference wiring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub altitude: f64,
    pub light_level: u16,
}

impl SensorReading {
    /// Round the analogue channels to one decimal place.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            temperature: round1(self.temperature),
            humidity: round1(self.humidity),
            pressure: round1(self.pressure),
            altitude: round1(self.altitude),
            light_level: self.light_level,
        }
    }

    /// History entry for this reading. Altitude and light are not retained.
    #[must_use]
    pub fn to_sample(&self, label: impl Into<String>) -> SensorSample {
        SensorSample {
            label: label.into(),
            temperature: self.temperature,
            humidity: self.humidity,
            pressure: self.pressure,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A time-labelled sample kept in the rolling history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Wall-clock `HH:MM` at sampling time. Not unique.
    pub label: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// Column-oriented view of the history, index-aligned and oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub labels: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub pressure: Vec<f64>,
}

impl<'a> FromIterator<&'a SensorSample> for HistorySnapshot {
    fn from_iter<I: IntoIterator<Item = &'a SensorSample>>(iter: I) -> Self {
        let mut snapshot = Self::default();
        for sample in iter {
            snapshot.labels.push(sample.label.clone());
            snapshot.temperature.push(sample.temperature);
            snapshot.humidity.push(sample.humidity);
            snapshot.pressure.push(sample.pressure);
        }
        snapshot
    }
}

impl HistorySnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
