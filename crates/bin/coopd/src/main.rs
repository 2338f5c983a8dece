//! # coopd: coop controller daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`coopd.toml`, env vars)
//! - Initialise `tracing`
//! - Bind every configured device to an output and build the controller
//! - Spawn the alarm signaler
//! - Build the axum router and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no control logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use coopctl_adapter_flock_http::FlockHttpFeed;
use coopctl_adapter_http_axum::state::AppState;
use coopctl_adapter_virtual::{VirtualPin, VirtualSensorBank};
use coopctl_app::alarm::AlarmSignaler;
use coopctl_app::controller::Controller;
use coopctl_app::device_registry::DeviceRegistry;
use coopctl_domain::device::DeviceName;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid log filter")?,
        )
        .init();

    // Outputs
    let bindings = config
        .devices
        .iter()
        .map(|device| {
            let name = DeviceName::new(device.name.as_str())?;
            tracing::debug!(device = %name, pin = device.pin, "binding output");
            Ok((name, VirtualPin::new(device.pin)))
        })
        .collect::<Result<Vec<_>, coopctl_domain::error::ValidationError>>()?;
    let registry = DeviceRegistry::new(bindings).context("failed to initialise outputs")?;

    // Sensors and remote feed
    let sensor = VirtualSensorBank::default();
    let feed = FlockHttpFeed::new(&config.flock).context("failed to build flock feed client")?;

    // Core
    let controller = Arc::new(
        Controller::new(
            registry,
            config.thresholds,
            sensor,
            feed,
            config.advertise_ip(),
        )
        .context("failed to build controller")?,
    );

    let signaler = AlarmSignaler::start(
        controller.alarm_flag(),
        VirtualPin::new(config.alarm.pin),
        config.alarm.timing(),
    );

    // HTTP
    let app = coopctl_adapter_http_axum::router::build(AppState::from_arc(controller));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        devices = config.devices.len(),
        flock_url = %config.flock.url,
        "coopd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    signaler.abort();
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
