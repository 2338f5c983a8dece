//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use coopctl_app::ports::{FlockFeed, OutputPin, SensorSource};
use coopctl_domain::device::{Device, DeviceStatus};
use coopctl_domain::error::{CoopError, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for commanding a device.
#[derive(Deserialize)]
pub struct CommandRequest {
    pub action: Option<String>,
}

/// Status of a single device, as returned by command and status endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceStatusBody {
    pub device: String,
    pub status: DeviceStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the command and status endpoints.
pub enum StatusResponse {
    Ok(Json<DeviceStatusBody>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<O, S, F>(State(state): State<AppState<O, S, F>>) -> ListResponse
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    ListResponse::Ok(Json(state.controller.devices()))
}

/// `POST /api/:device` with `{"action": "on" | "off"}`
///
/// A body that is not JSON or has no `action` is treated like any other
/// invalid command: 400 with an error body.
pub async fn command<O, S, F>(
    State(state): State<AppState<O, S, F>>,
    Path(device): Path<String>,
    body: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<StatusResponse, ApiError>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    run_command(&state, device, body)
}

/// `POST` on a fixed API path such as `/api/temp`.
///
/// The last path segment is treated as a device name so these paths answer
/// like any other unknown device instead of 405.
pub async fn command_on_fixed_path<O, S, F>(
    State(state): State<AppState<O, S, F>>,
    uri: Uri,
    body: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<StatusResponse, ApiError>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    let device = uri
        .path()
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string();
    run_command(&state, device, body)
}

fn run_command<O, S, F>(
    state: &AppState<O, S, F>,
    device: String,
    body: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<StatusResponse, ApiError>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    let action = match body {
        Ok(Json(CommandRequest {
            action: Some(action),
        })) => action,
        Ok(_) => return Err(CoopError::from(ValidationError::MissingAction).into()),
        Err(rejection) => {
            tracing::debug!(%rejection, %device, "unreadable command body");
            return Err(CoopError::from(ValidationError::MissingAction).into());
        }
    };

    let status = state.controller.command(&device, &action)?;
    Ok(StatusResponse::Ok(Json(DeviceStatusBody { device, status })))
}

/// `GET /api/:device/status`
pub async fn status<O, S, F>(
    State(state): State<AppState<O, S, F>>,
    Path(device): Path<String>,
) -> Result<StatusResponse, ApiError>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    let status = state.controller.device_status(&device)?;
    Ok(StatusResponse::Ok(Json(DeviceStatusBody { device, status })))
}
