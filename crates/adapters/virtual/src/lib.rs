//! # coopctl-adapter-virtual
//!
//! Simulated hardware for running the controller without a board attached.
//!
//! ## Provided hardware
//!
//! | Type | Port | Behaviour |
//! |------|------|-----------|
//! | [`VirtualPin`] | `OutputPin` | Latches the last written level, counts writes |
//! | [`VirtualSensorBank`] | `SensorSource` | Returns a settable reading |
//!
//! Both can be switched into a fault mode to exercise error paths.
//!
//! ## Dependency rule
//!
//! Depends on `coopctl-app` (port traits) and `coopctl-domain` only.

mod pin;
mod sensor;

pub use pin::{PinFault, VirtualPin};
pub use sensor::{SensorFault, VirtualSensorBank};
