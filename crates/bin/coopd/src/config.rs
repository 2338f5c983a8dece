//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `coopd.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use coopctl_adapter_flock_http::FlockConfig;
use coopctl_app::alarm::SignalTiming;
use coopctl_domain::device::LAMP;
use coopctl_domain::threshold::ThresholdConfig;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Automation thresholds.
    pub thresholds: ThresholdConfig,
    /// Alarm output settings.
    pub alarm: AlarmConfig,
    /// Remote flock feed.
    pub flock: FlockConfig,
    /// Controllable outputs, in the order they are listed.
    pub devices: Vec<DeviceConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Address reported by `GET /api/status`. Falls back to `host`.
    pub advertise_ip: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Alarm buzzer configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Output pin driving the buzzer.
    pub pin: u8,
    /// Re-check interval while the alarm is raised, in milliseconds.
    pub active_interval_ms: u64,
    /// Re-check interval while the alarm is lowered, in milliseconds.
    pub idle_interval_ms: u64,
}

/// One `[[devices]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub pin: u8,
}

impl Config {
    /// Load configuration from `coopd.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("coopd.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply `COOPD_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("COOPD_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("COOPD_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = lookup("COOPD_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("COOPD_ADVERTISE_IP") {
            self.server.advertise_ip = Some(val);
        }
        if let Some(val) = lookup("COOPD_FLOCK_URL") {
            self.flock.url = val;
        }
        if let Some(val) = lookup("COOPD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("port must be non-zero"));
        }
        self.thresholds
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        if self.flock.timeout_ms == 0 {
            return Err(invalid("flock timeout must be non-zero"));
        }
        if self.alarm.active_interval_ms == 0 || self.alarm.idle_interval_ms == 0 {
            return Err(invalid("alarm intervals must be non-zero"));
        }

        let mut names = HashSet::new();
        let mut pins = HashSet::new();
        for device in &self.devices {
            if device.name.trim().is_empty() {
                return Err(invalid("device name must not be empty"));
            }
            if RESERVED_NAMES.contains(&device.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "device name '{}' collides with a fixed API path",
                    device.name
                )));
            }
            if !names.insert(device.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "device '{}' is configured twice",
                    device.name
                )));
            }
            if !pins.insert(device.pin) {
                return Err(ConfigError::Validation(format!(
                    "pin {} is bound to more than one device",
                    device.pin
                )));
            }
        }
        if !names.contains(LAMP) {
            return Err(invalid("a device named 'lamp' must be configured"));
        }
        if pins.contains(&self.alarm.pin) {
            return Err(ConfigError::Validation(format!(
                "alarm pin {} is also bound to a device",
                self.alarm.pin
            )));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Address reported to status callers.
    #[must_use]
    pub fn advertise_ip(&self) -> &str {
        self.server
            .advertise_ip
            .as_deref()
            .unwrap_or(&self.server.host)
    }
}

impl AlarmConfig {
    #[must_use]
    pub fn timing(&self) -> SignalTiming {
        SignalTiming {
            active: Duration::from_millis(self.active_interval_ms),
            idle: Duration::from_millis(self.idle_interval_ms),
        }
    }
}

/// Names served by fixed `/api` routes; a device using one could never be
/// reached through `POST /api/{device}`.
const RESERVED_NAMES: [&str; 5] = ["temp", "temp-history", "kandang", "status", "devices"];

fn invalid(message: &str) -> ConfigError {
    ConfigError::Validation(message.to_string())
}

fn default_devices() -> Vec<DeviceConfig> {
    [("fan", 12), ("lamp", 13), ("heater", 14), ("pump", 15), ("feeder", 2)]
        .into_iter()
        .map(|(name, pin)| DeviceConfig {
            name: name.to_string(),
            pin,
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            thresholds: ThresholdConfig::default(),
            alarm: AlarmConfig::default(),
            flock: FlockConfig::default(),
            devices: default_devices(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            advertise_ip: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "coopd=info,coopctl=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            pin: 27,
            active_interval_ms: 500,
            idle_interval_ms: 100,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
