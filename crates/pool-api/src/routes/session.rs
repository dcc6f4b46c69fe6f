//! Credential endpoint

use axum::{extract::State, http::StatusCode, routing::put, Json, Router};

use crate::dto::{ApiError, TokenRequest};
use crate::AppState;

/// Create session routes
pub fn router() -> Router<AppState> {
    Router::new().route("/token", put(set_token))
}

/// PUT /session/token - Set or clear the bearer credential
pub async fn set_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    state.set_token(request.token).map_err(|_| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::watcher_stopped()),
        )
    })?;
    Ok(StatusCode::NO_CONTENT)
}
