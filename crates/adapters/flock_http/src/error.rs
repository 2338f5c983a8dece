//! Flock feed adapter error types.

use coopctl_domain::error::CoopError;

/// Errors specific to the HTTP flock feed.
#[derive(Debug, thiserror::Error)]
pub enum FlockHttpError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// Connection, transport or timeout failure.
    #[error("flock feed request failed")]
    Request(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("flock feed returned HTTP {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("failed to decode flock feed body")]
    Decode(#[source] reqwest::Error),
}

impl FlockHttpError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(err) => err.is_timeout(),
            _ => false,
        }
    }
}

impl From<FlockHttpError> for CoopError {
    fn from(err: FlockHttpError) -> Self {
        CoopError::Feed(Box::new(err))
    }
}
