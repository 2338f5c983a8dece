//! JSON REST handler for node status.

use axum::Json;
use axum::extract::State;

use coopctl_app::ports::{FlockFeed, OutputPin, SensorSource};
use coopctl_domain::report::NodeStatus;

use crate::state::AppState;

/// `GET /api/status`
pub async fn status<O, S, F>(State(state): State<AppState<O, S, F>>) -> Json<NodeStatus>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    Json(state.controller.node_status())
}
