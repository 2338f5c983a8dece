//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the controller core and the hardware or
//! network it talks to. They are defined here (in `app`) so that both the
//! core and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod flock_feed;
pub mod output;
pub mod sensor;

pub use flock_feed::FlockFeed;
pub use output::OutputPin;
pub use sensor::SensorSource;
