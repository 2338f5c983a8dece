//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
pub mod flock;
pub mod node;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;

use axum::Router;
use axum::routing::{get, post};

use coopctl_app::ports::{FlockFeed, OutputPin, SensorSource};

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// Fixed paths take precedence over the `/{device}` catch-all, so a device
/// can never shadow `temp`, `kandang` or `status`. A `POST` on a fixed path
/// is still answered as a device command.
pub fn routes<O, S, F>() -> Router<AppState<O, S, F>>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    Router::new()
        // Sensors
        .route(
            "/temp",
            get(sensors::current::<O, S, F>).post(devices::command_on_fixed_path::<O, S, F>),
        )
        .route(
            "/temp-history",
            get(sensors::history::<O, S, F>).post(devices::command_on_fixed_path::<O, S, F>),
        )
        // Flock feed
        .route(
            "/kandang",
            get(flock::get::<O, S, F>).post(devices::command_on_fixed_path::<O, S, F>),
        )
        // Node
        .route(
            "/status",
            get(node::status::<O, S, F>).post(devices::command_on_fixed_path::<O, S, F>),
        )
        // Devices
        .route(
            "/devices",
            get(devices::list::<O, S, F>).post(devices::command_on_fixed_path::<O, S, F>),
        )
        .route("/{device}", post(devices::command::<O, S, F>))
        .route("/{device}/status", get(devices::status::<O, S, F>))
}
