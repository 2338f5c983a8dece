//! Flock aggregator: best-effort view of the remote coop feed.

use coopctl_domain::flock::FlockMetrics;

use crate::ports::FlockFeed;

/// Fetches the remote flock payload and reshapes it into [`FlockMetrics`].
///
/// Never fails: every error is logged and surfaced as
/// [`FlockMetrics::Unavailable`]. One attempt per call, no retries.
pub struct FlockAggregator<F> {
    feed: F,
}

impl<F: FlockFeed> FlockAggregator<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    pub async fn fetch(&self) -> FlockMetrics {
        let metrics = match self.feed.fetch().await {
            Ok(payload) => FlockMetrics::from_payload(payload),
            Err(err) => {
                tracing::warn!(%err, source = ?std::error::Error::source(&err), "flock feed fetch failed");
                return FlockMetrics::Unavailable;
            }
        };
        if metrics.is_available() {
            tracing::debug!(kind = metrics.kind(), "flock metrics aggregated");
        } else {
            tracing::warn!("flock feed returned an unusable payload");
        }
        metrics
    }
}
