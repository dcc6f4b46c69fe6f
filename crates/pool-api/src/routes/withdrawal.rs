//! Withdrawal lock endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use withdrawal_locks::{LockBoard, LockEntryView};

use crate::dto::ApiError;
use crate::AppState;

/// Create withdrawal lock routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locks", get(get_locks))
        .route("/locks/:tx_hash", get(get_lock))
        .route("/refresh", post(refresh))
}

/// GET /withdrawal/locks - Current lock panel snapshot
pub async fn get_locks(State(state): State<AppState>) -> Json<LockBoard> {
    Json(state.board())
}

/// GET /withdrawal/locks/:tx_hash - A single lock card
pub async fn get_lock(
    State(state): State<AppState>,
    Path(tx_hash): Path<String>,
) -> Result<Json<LockEntryView>, (StatusCode, Json<ApiError>)> {
    state
        .board()
        .entry(&tx_hash)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(
                    "not_found",
                    format!("No locked transaction {}", tx_hash),
                )),
            )
        })
}

/// POST /withdrawal/refresh - Re-fetch the lock registry
pub async fn refresh(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    state.watcher().refresh().map_err(|e| {
        tracing::warn!("Refresh rejected: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::watcher_stopped()),
        )
    })?;
    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::routes::test_util::{body_json, locked_tx, spawn_app, StaticRegistry};

    #[tokio::test(start_paused = true)]
    async fn test_locks_snapshot_is_served() {
        let registry = StaticRegistry::new(vec![locked_tx("abc", 120, 120)]);
        let (app, state) = spawn_app(registry.clone(), Some("jwt")).await;

        let resp = app
            .oneshot(Request::get("/withdrawal/locks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["phase"], "populated");
        let entry = &json["entries"][0];
        assert_eq!(entry["tx_hash"], "abc");
        assert_eq!(entry["available"], false);
        assert_eq!(entry["explorer_url"], "https://tonscan.org/tx/abc");
        assert!(state.board().entry("abc").is_some());
    }

    #[tokio::test]
    async fn test_unknown_lock_is_404() {
        let (app, _state) = spawn_app(StaticRegistry::new(vec![]), Some("jwt")).await;
        let resp = app
            .oneshot(
                Request::get("/withdrawal/locks/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["code"], "not_found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_lock_is_served() {
        let registry = StaticRegistry::new(vec![locked_tx("abc", 3600, 1800)]);
        let (app, _state) = spawn_app(registry, Some("jwt")).await;
        let resp = app
            .oneshot(Request::get("/withdrawal/locks/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["countdown"], "30m 0s");
        assert_eq!(json["progress"], 0.5);
    }

    #[tokio::test]
    async fn test_refresh_triggers_fetch() {
        let registry = StaticRegistry::new(vec![]);
        let (app, state) = spawn_app(registry.clone(), Some("jwt")).await;
        assert_eq!(registry.calls(), 1);

        let resp = app
            .oneshot(Request::post("/withdrawal/refresh").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let mut rx = state.watcher().subscribe();
        rx.wait_for(|_| registry.calls() == 2).await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_after_shutdown_is_503() {
        let (app, state) = spawn_app(StaticRegistry::new(vec![]), Some("jwt")).await;
        state.watcher().shutdown().unwrap();
        let mut rx = state.watcher().subscribe();
        // Resolves with an error once the watcher drops its sender
        while rx.changed().await.is_ok() {}

        let resp = app
            .oneshot(Request::post("/withdrawal/refresh").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(resp).await["code"], "watcher_stopped");
    }
}
