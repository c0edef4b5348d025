//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses through the conventional [`Reply`] envelope.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    constants::messages,
    reply::{Reply, ReplyError},
};

/// Postgres SQLSTATE for a serialization failure
const SERIALIZATION_FAILURE: &str = "40001";

/// Postgres SQLSTATE for a detected deadlock
const DEADLOCK_DETECTED: &str = "40P01";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Unauthorized")]
    Unauthorized,

    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Concurrency errors
    #[error("{0}")]
    Conflict(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Client error with a fixed message
    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether retrying the whole operation may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            _ => self.to_string(),
        };

        match Reply::error(status, message) {
            Ok(reply) => reply.into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build error reply");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": { "message": "An internal error occurred" } })),
                )
                    .into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                // Position collisions and aborted serializable transactions
                // both mean another insert got there first
                let transient = db_err.is_unique_violation()
                    || matches!(
                        db_err.code().as_deref(),
                        Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)
                    );
                if transient {
                    tracing::warn!(error = %db_err, "Concurrent ranking modification detected");
                    AppError::Conflict(messages::CONCURRENT_MODIFICATION.to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!(error = %err, "Token rejected");
        AppError::Unauthorized
    }
}

impl From<ReplyError> for AppError {
    fn from(err: ReplyError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::validation(messages::INVALID_NAME).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound(messages::RANKING_NOT_FOUND.to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Conflict(messages::CONCURRENT_MODIFICATION.to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        assert_eq!(
            AppError::validation(messages::INVALID_GRADE_AND_CLASS).to_string(),
            "Invalid grade and class"
        );
    }

    #[test]
    fn test_only_conflicts_are_transient() {
        assert!(AppError::Conflict("x".to_string()).is_transient());
        assert!(!AppError::Database("x".to_string()).is_transient());
        assert!(!AppError::validation("x").is_transient());
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
