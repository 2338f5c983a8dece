//! Flock feed configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the remote flock feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    /// Full URL of the remote coop metrics endpoint.
    pub url: String,
    /// Upper bound on the whole request, connection included, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            url: "http://192.168.57.147:5000/api/kandang".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl FlockConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
