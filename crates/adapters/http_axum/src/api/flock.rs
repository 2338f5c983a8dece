//! JSON REST handler for the aggregated flock feed.

use axum::Json;
use axum::extract::State;

use coopctl_app::ports::{FlockFeed, OutputPin, SensorSource};
use coopctl_domain::flock::FlockMetrics;

use crate::state::AppState;

/// `GET /api/kandang`
///
/// Always 200: a failed or unusable feed is reported through the
/// placeholder body, never through the status code.
pub async fn get<O, S, F>(State(state): State<AppState<O, S, F>>) -> Json<FlockMetrics>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    Json(state.controller.flock().await)
}
