//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether the lock watcher task is alive
    pub watcher_running: bool,
    /// Staking backend the watcher polls
    pub backend_url: String,
}

impl HealthResponse {
    pub fn new(watcher_running: bool, backend_url: impl Into<String>) -> Self {
        Self {
            status: if watcher_running { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            watcher_running,
            backend_url: backend_url.into(),
        }
    }
}

/// Credential update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Bearer token, or null to sign out
    pub token: Option<String>,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn watcher_stopped() -> Self {
        Self::new("watcher_stopped", "Lock watcher is not running")
    }
}
