//! Health check handlers

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    reply::Reply,
    state::AppState,
};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
}

/// Liveness probe, answered outside the reply envelope
async fn ping() -> Json<Value> {
    Json(json!({ "ping": "pong" }))
}

/// Health check endpoint, including the ranking store
async fn health_check(State(state): State<AppState>) -> AppResult<Reply> {
    let store = if state.config().database.url.is_some() {
        "postgres"
    } else {
        "memory"
    };

    if let Err(e) = state.ranking().ping().await {
        tracing::error!(error = %e, store, "Health check failed");
        return Ok(Reply::error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Ranking store unavailable",
        )?);
    }

    Ok(Reply::ok(&HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        store,
    })?)
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
}
