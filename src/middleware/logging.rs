//! Logging middleware

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};

/// How a finished request is reported
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Served,
    Rejected,
    Failed,
}

fn classify(status: StatusCode) -> Outcome {
    if status.is_server_error() {
        Outcome::Failed
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        // Lookups of absent positions are routine for a leaderboard
        Outcome::Rejected
    } else {
        Outcome::Served
    }
}

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let code = status.as_u16();

    match classify(status) {
        Outcome::Failed => error!(%method, %path, status = code, elapsed_ms, "Request failed"),
        Outcome::Rejected => warn!(%method, %path, status = code, elapsed_ms, "Request rejected"),
        Outcome::Served => info!(%method, %path, status = code, elapsed_ms, "Request served"),
    }

    response
}
