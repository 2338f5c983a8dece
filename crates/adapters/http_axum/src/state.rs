//! Shared application state for axum handlers.

use std::sync::Arc;

use coopctl_app::controller::Controller;
use coopctl_app::ports::{FlockFeed, OutputPin, SensorSource};

/// Application state shared across all axum handlers.
///
/// Generic over the output, sensor and feed types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<O, S, F> {
    /// The process-wide controller.
    pub controller: Arc<Controller<O, S, F>>,
}

impl<O, S, F> Clone for AppState<O, S, F> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<O, S, F> AppState<O, S, F>
where
    O: OutputPin + 'static,
    S: SensorSource + 'static,
    F: FlockFeed + 'static,
{
    /// Create a new application state owning `controller`.
    pub fn new(controller: Controller<O, S, F>) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }

    /// Create a new application state from a pre-wrapped controller.
    ///
    /// Use this when the controller is also shared with background tasks.
    pub fn from_arc(controller: Arc<Controller<O, S, F>>) -> Self {
        Self { controller }
    }
}
