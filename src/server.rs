use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::warn;

use crate::data::{PositionSnapshot, TradeLogEntry};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/positions", get(get_positions))
        .route("/refresh", get(manual_refresh))
        .route("/logs", post(create_log))
        .route("/export", get(export_sheet))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn get_positions(State(state): State<AppState>) -> Json<PositionSnapshot> {
    Json(state.store.read().await)
}

/// Runs one refresh cycle synchronously. Unlike the background loop, a
/// failure here surfaces to the caller instead of the journal.
async fn manual_refresh(
    State(state): State<AppState>,
) -> Result<Json<PositionSnapshot>, (StatusCode, String)> {
    match state.poller.refresh_once().await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(err) => {
            warn!("Manual refresh failed: {}", err);
            Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
    }
}

async fn create_log(
    State(state): State<AppState>,
    Json(entry): Json<TradeLogEntry>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    match state.journal.append(&entry) {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({"status": "logged"})),
        )),
        Err(err) => Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string())),
    }
}

async fn export_sheet(State(state): State<AppState>) -> Response {
    match tokio::fs::read(state.poller.exporter.path()).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"positions.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Export not generated yet").into_response(),
    }
}
