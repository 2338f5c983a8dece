//! # coopctl-domain
//!
//! Pure domain model for the coopctl enclosure controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, clock labels
//! - Define **Devices** (named relay outputs and their on/off status)
//! - Define **Thresholds** (lamp hysteresis band, temperature alarm limit)
//!   and the pure transition rules they imply
//! - Define **Samples** (sensor readings and the rolling-history view)
//! - Define **Flock metrics** (the reshaped remote coop feed)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod device;
pub mod flock;
pub mod report;
pub mod sample;
pub mod threshold;
