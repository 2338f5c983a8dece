//! Time helpers: wall-clock labels for history samples.

use chrono::{DateTime, Local, TimeZone};

/// Local wall-clock timestamp used when labelling samples.
pub type Timestamp = DateTime<Local>;

/// Return the current local time.
#[must_use]
pub fn now() -> Timestamp {
    Local::now()
}

/// Format a zero-padded `HH:MM` label.
#[must_use]
pub fn clock_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M").to_string()
}
