//! Configuration types for pool-watch

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Staking backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL (e.g., "http://127.0.0.1:5000")
    pub url: String,

    /// Per-request timeout. `None` leaves the transport default (no timeout).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Countdown watcher tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Countdown tick period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Drop fetch responses older than the newest one already applied.
    /// Off by default: the last response to resolve wins.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            discard_stale_responses: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Countdown settings
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Local API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Bearer token to start with, if already known
    #[serde(default)]
    pub token: Option<String>,
}

fn default_api_port() -> u16 {
    19080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            watcher: WatcherConfig::default(),
            api_port: default_api_port(),
            token: None,
        }
    }
}

impl AppConfig {
    /// Load from an optional JSON file, then apply `POOL_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&raw).map_err(|e| {
                    Error::Config(format!("invalid config {}: {}", path.display(), e))
                })?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("POOL_BACKEND_URL") {
            if url.trim().is_empty() {
                return Err(Error::Config("POOL_BACKEND_URL is empty".to_string()));
            }
            self.backend.url = url;
        }
        if let Some(port) = lookup("POOL_API_PORT") {
            self.api_port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid POOL_API_PORT: {}", port)))?;
        }
        if let Some(secs) = lookup("POOL_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::Config(format!("invalid POOL_REQUEST_TIMEOUT_SECS: {}", secs))
            })?;
            self.backend.request_timeout_secs = Some(secs);
        }
        if let Some(token) = lookup("POOL_ACCESS_TOKEN") {
            self.token = Some(token).filter(|t| !t.trim().is_empty());
        }
        Ok(())
    }
}
