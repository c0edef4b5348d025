//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{error::AppError, state::AppState};

/// Editor extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthenticatedEditor {
    pub id: String,
}

impl<S> FromRequestParts<S> for AuthenticatedEditor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedEditor>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            debug!(path = %path, "Auth failed: missing or malformed Authorization header");
            AppError::Unauthorized
        })?;

    let claims = state.keys().verify(token).inspect_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: token verification failed");
    })?;

    debug!(path = %path, editor = %claims.sub, "Editor authenticated");

    request
        .extensions_mut()
        .insert(AuthenticatedEditor { id: claims.sub });
    Ok(next.run(request).await)
}
