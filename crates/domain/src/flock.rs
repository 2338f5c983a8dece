//! Flock metrics: reshaping the remote coop feed into a stable response.
//!
//! The remote feed answers either with a list of per-pen records, a single
//! pre-aggregated record, or something unusable. [`FlockMetrics`] models
//! those outcomes as an exhaustive union so callers never branch on raw JSON
//! shape.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Placeholder emitted for every field when the feed is unavailable.
pub const PLACEHOLDER: &str = "-";

/// Counted fields of a flock record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlockField {
    Animals,
    Feed,
    Water,
}

impl FlockField {
    pub const ALL: [Self; 3] = [Self::Animals, Self::Feed, Self::Water];

    /// JSON key of this field.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Animals => "animals",
            Self::Feed => "feed",
            Self::Water => "water",
        }
    }
}

/// Field-wise integer totals over a list of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FlockTotals {
    pub animals: i64,
    pub feed: i64,
    pub water: i64,
}

impl FlockTotals {
    fn add(&mut self, field: FlockField, amount: i64) {
        let slot = match field {
            FlockField::Animals => &mut self.animals,
            FlockField::Feed => &mut self.feed,
            FlockField::Water => &mut self.water,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// Result of one aggregation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FlockMetrics {
    /// The feed returned a non-empty list; counts were summed field-wise.
    Summed(FlockTotals),
    /// The feed returned a single record, forwarded untouched.
    Passthrough(Map<String, Value>),
    /// The feed failed or returned an unusable shape.
    Unavailable,
}

impl FlockMetrics {
    /// Reshape a decoded feed payload.
    #[must_use]
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::Array(records) if !records.is_empty() => Self::Summed(sum_fields(&records)),
            Value::Object(record) => Self::Passthrough(record),
            _ => Self::Unavailable,
        }
    }

    /// Short tag naming the branch, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Summed(_) => "summed",
            Self::Passthrough(_) => "passthrough",
            Self::Unavailable => "unavailable",
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl Serialize for FlockMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Summed(totals) => totals.serialize(serializer),
            Self::Passthrough(record) => record.serialize(serializer),
            Self::Unavailable => {
                let mut map = serializer.serialize_map(Some(FlockField::ALL.len()))?;
                for field in FlockField::ALL {
                    map.serialize_entry(field.key(), PLACEHOLDER)?;
                }
                map.end()
            }
        }
    }
}

/// Sum every [`FlockField`] over `records`.
///
/// Each field of each record is parsed independently with [`parse_count`];
/// a bad or missing value contributes 0 without affecting the others.
#[must_use]
pub fn sum_fields(records: &[Value]) -> FlockTotals {
    let mut totals = FlockTotals::default();
    for record in records {
        for field in FlockField::ALL {
            totals.add(field, parse_count(record.get(field.key())));
        }
    }
    totals
}

/// Parse a JSON value as an integer count, defaulting to 0.
///
/// Integers pass through, floats are truncated toward zero, numeric strings
/// are parsed after trimming and booleans count as 0 or 1. Anything else,
/// including a missing key, yields 0.
#[must_use]
pub fn parse_count(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| truncate(n.as_f64())),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: Option<f64>) -> i64 {
    match value {
        Some(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}
