//! pool-client: Client for the staking backend's withdrawal lock registry
//!
//! Issues authenticated reads against the external backend. The backend owns
//! all lock bookkeeping; this crate only transports and decodes it.

use std::time::Duration;

use async_trait::async_trait;
use pool_core::constants::{GENERIC_FETCH_ERROR, LOCKED_TRANSACTIONS_PATH};
use pool_core::{BackendConfig, Error, FetchError, LockedTransaction, LockedTransactionsResponse};
use serde::Deserialize;

/// Result type for registry fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Source of the authenticated user's locked transactions.
#[async_trait]
pub trait LockRegistry: Send + Sync {
    /// Fetch the current lock registry.
    ///
    /// An absent credential fails with [`FetchError::Unauthenticated`]
    /// without any request being issued.
    async fn fetch_locked(&self, token: Option<&str>) -> FetchResult<Vec<LockedTransaction>>;
}

/// Error body shape used by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// HTTP client for the staking backend
#[derive(Clone)]
pub struct PoolClient {
    client: reqwest::Client,
    config: BackendConfig,
}

impl PoolClient {
    pub fn new(config: BackendConfig) -> Result<Self, Error> {
        if config.url.trim().is_empty() {
            return Err(Error::Config("backend url is empty".to_string()));
        }
        let mut builder = reqwest::Client::builder().user_agent("pool-watch");
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn join(&self, path: &str) -> String {
        let base = self.config.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl LockRegistry for PoolClient {
    async fn fetch_locked(&self, token: Option<&str>) -> FetchResult<Vec<LockedTransaction>> {
        let token = match token {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(FetchError::Unauthenticated),
        };

        let url = self.join(LOCKED_TRANSACTIONS_PATH);
        tracing::debug!(url = %url, "Fetching locked transactions");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %body, "Lock registry request failed");
            return Err(FetchError::Server {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        let parsed: LockedTransactionsResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        tracing::debug!(
            count = parsed.locked_transactions.len(),
            "Locked transactions received"
        );
        Ok(parsed.locked_transactions)
    }
}

/// Pick the backend's own message out of an error body, if it has one.
fn server_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string())
}
