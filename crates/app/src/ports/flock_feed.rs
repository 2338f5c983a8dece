//! Flock feed port: raw access to the remote coop metrics endpoint.

use std::future::Future;

use coopctl_domain::error::CoopError;

/// One-shot fetch of the remote flock payload.
///
/// Implementations make a single timeout-bounded attempt and release their
/// connection before returning, whatever the outcome.
pub trait FlockFeed: Send + Sync {
    /// Fetch and decode the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::Feed`] on transport failure, timeout, non-success
    /// status or an undecodable body.
    fn fetch(&self) -> impl Future<Output = Result<serde_json::Value, CoopError>> + Send;
}
