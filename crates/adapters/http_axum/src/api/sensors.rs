//! JSON REST handlers for sensor polling and history.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use coopctl_app::ports::{FlockFeed, OutputPin, SensorSource};
use coopctl_domain::report::PollReport;
use coopctl_domain::sample::HistorySnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the poll endpoint.
pub enum CurrentResponse {
    Ok(Json<PollReport>),
}

impl IntoResponse for CurrentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the history endpoint.
pub enum HistoryResponse {
    Ok(Json<HistorySnapshot>),
}

impl IntoResponse for HistoryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/temp`
///
/// Every call is a poll: it reads the sensors, runs automation and appends
/// one history sample.
pub async fn current<O, S, F>(
    State(state): State<AppState<O, S, F>>,
) -> Result<CurrentResponse, ApiError>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    let report = state.controller.poll().await?;
    Ok(CurrentResponse::Ok(Json(report)))
}

/// `GET /api/temp-history`
pub async fn history<O, S, F>(State(state): State<AppState<O, S, F>>) -> HistoryResponse
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    HistoryResponse::Ok(Json(state.controller.history()))
}
