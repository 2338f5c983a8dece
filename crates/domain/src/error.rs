//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CoopError`]
//! via `#[from]`. IO-flavoured failures (sensor bus, output pins, the remote
//! flock feed) are boxed so the domain stays free of adapter types.

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for every fallible coopctl operation.
#[derive(Debug, thiserror::Error)]
pub enum CoopError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The sensor bank could not produce a reading.
    #[error("sensor read failed")]
    Sensor(#[source] BoxError),

    /// A physical output rejected a write.
    #[error("output write failed")]
    Output(#[source] BoxError),

    /// The remote flock feed could not be fetched or decoded.
    #[error("flock feed unavailable")]
    Feed(#[source] BoxError),
}

/// Invalid input from a caller or from startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid device or action: unknown device '{0}'")]
    UnknownDevice(String),

    #[error("invalid device or action: unsupported action '{0}'")]
    InvalidAction(String),

    #[error("invalid device or action: missing action")]
    MissingAction,

    #[error("device name must not be empty")]
    EmptyDeviceName,

    #[error("device '{0}' is bound more than once")]
    DuplicateDevice(String),

    #[error("required device '{0}' is not bound")]
    MissingDevice(&'static str),

    #[error("lamp_on ({lamp_on}) must be greater than lamp_off ({lamp_off})")]
    InvalidThresholds { lamp_on: u16, lamp_off: u16 },
}

/// A lookup by name found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} not found: {name}")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub name: String,
}
