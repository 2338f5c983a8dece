//! # coopctl-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the controller's **JSON API** under `/api`
//!   (`/api/temp`, `/api/temp-history`, `/api/{device}`, `/api/kandang`, …)
//! - Map HTTP requests into [`Controller`](coopctl_app::controller::Controller)
//!   calls (driving adapter)
//! - Map controller results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `coopctl-app` (for the controller and port traits) and
//! `coopctl-domain` (for the types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
