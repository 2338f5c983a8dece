//! # coopctl-app
//!
//! Controller core: the components shared by request handling and the
//! background alarm task, plus the **port definitions** (traits) they use to
//! reach hardware and the network.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `OutputPin`: one binary physical output
//!   - `SensorSource`: read the current sensor bank
//!   - `FlockFeed`: fetch the remote flock payload
//! - Provide the core components:
//!   - `DeviceRegistry`: named outputs with their status
//!   - `AutomationEngine`: lamp hysteresis and the temperature alarm
//!   - `HistoryBuffer`: the rolling sample log
//!   - `AlarmSignaler`: background task mirroring the alarm flag
//!   - `FlockAggregator`: tolerant reshaping of the remote feed
//!   - `Controller`: owns all of the above for the process lifetime
//!
//! ## Dependency rule
//! Depends on `coopctl-domain` only (plus `tokio` for the signaler task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod alarm;
pub mod automation_engine;
pub mod controller;
pub mod device_registry;
pub mod flock_aggregator;
pub mod history;
pub mod ports;
