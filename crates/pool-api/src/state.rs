//! Application state shared across API handlers

use std::sync::Arc;

use pool_core::AppConfig;
use withdrawal_locks::{LockBoard, WatcherError, WatcherHandle};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    watcher: WatcherHandle,
}

impl AppState {
    pub fn new(config: AppConfig, watcher: WatcherHandle) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, watcher }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn watcher(&self) -> &WatcherHandle {
        &self.inner.watcher
    }

    /// Current lock snapshot
    pub fn board(&self) -> LockBoard {
        self.inner.watcher.board()
    }

    /// Replace the credential used for lock registry fetches
    pub fn set_token(&self, token: Option<String>) -> Result<(), WatcherError> {
        let token = token.filter(|t| !t.trim().is_empty());
        tracing::info!(signed_in = token.is_some(), "Updating backend credential");
        self.inner.watcher.set_token(token)
    }
}
