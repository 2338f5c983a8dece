//! # coopctl-adapter-flock-http
//!
//! Flock feed adapter: fetches the remote coop metrics endpoint over HTTP.
//!
//! ## Responsibilities
//! - Issue one `GET` per request against the configured URL
//! - Bound the whole exchange by the configured timeout
//! - Treat any non-2xx status or non-JSON body as a failure
//!
//! Reshaping the payload is not done here; see
//! [`coopctl_app::flock_aggregator`].
//!
//! ## Dependency rule
//! Depends on `coopctl-app` (for the [`FlockFeed`] port) and `coopctl-domain`.

pub mod config;
pub mod error;

use reqwest::header;
use serde_json::Value;

use coopctl_app::ports::FlockFeed;
use coopctl_domain::error::CoopError;

pub use config::FlockConfig;
pub use error::FlockHttpError;

/// [`FlockFeed`] backed by a `reqwest` client.
pub struct FlockHttpFeed {
    client: reqwest::Client,
    url: String,
}

impl FlockHttpFeed {
    /// Build a feed for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FlockHttpError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &FlockConfig) -> Result<Self, FlockHttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(FlockHttpError::Client)?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Single attempt, no retries. The connection is not kept alive.
    ///
    /// # Errors
    ///
    /// See [`FlockHttpError`].
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn get(&self) -> Result<Value, FlockHttpError> {
        let response = self
            .client
            .get(&self.url)
            .header(header::CONNECTION, "close")
            .send()
            .await
            .map_err(FlockHttpError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlockHttpError::Status(status.as_u16()));
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(FlockHttpError::Decode)?;
        tracing::debug!("flock feed fetched");
        Ok(payload)
    }
}

impl FlockFeed for FlockHttpFeed {
    async fn fetch(&self) -> Result<Value, CoopError> {
        Ok(self.get().await?)
    }
}
