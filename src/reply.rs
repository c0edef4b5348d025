//! Conventional reply envelope
//!
//! Every response leaving the API has one of three body shapes, decided by
//! the class of its status code:
//!
//! | class                  | body                      |
//! |------------------------|---------------------------|
//! | 1xx info, 3xx redirect | `{"message": ...}`        |
//! | 2xx success            | `{"data": ...}`           |
//! | 4xx / 5xx error        | `{"error": {"message": ...}}` |
//!
//! [`Reply::new`] rejects any pairing that breaks this table, so a `Reply`
//! that exists is always well-formed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Status code class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyClass {
    Info,
    Success,
    Redirect,
    ClientError,
    ServerError,
}

impl ReplyClass {
    /// Classify a numeric status code
    pub fn of(code: u16) -> Result<Self, ReplyError> {
        match code {
            100..=199 => Ok(Self::Info),
            200..=299 => Ok(Self::Success),
            300..=399 => Ok(Self::Redirect),
            400..=499 => Ok(Self::ClientError),
            500..=599 => Ok(Self::ServerError),
            _ => Err(ReplyError::InvalidCode(code)),
        }
    }
}

/// Error payload nested under `error`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Reply body shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyBody {
    Message { message: String },
    Data { data: serde_json::Value },
    Error { error: ErrorMessage },
}

impl ReplyBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: ErrorMessage {
                message: message.into(),
            },
        }
    }

    fn fits(&self, class: ReplyClass) -> Result<(), ReplyError> {
        match (class, self) {
            (ReplyClass::Info | ReplyClass::Redirect, Self::Message { .. }) => Ok(()),
            (ReplyClass::Info | ReplyClass::Redirect, _) => Err(ReplyError::ExpectedMessage),
            (ReplyClass::Success, Self::Data { .. }) => Ok(()),
            (ReplyClass::Success, _) => Err(ReplyError::ExpectedData),
            (ReplyClass::ClientError | ReplyClass::ServerError, Self::Error { .. }) => Ok(()),
            (ReplyClass::ClientError | ReplyClass::ServerError, _) => {
                Err(ReplyError::ExpectedError)
            }
        }
    }
}

/// A status code together with a body of the matching shape
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    class: ReplyClass,
    body: ReplyBody,
}

impl Reply {
    /// Build a reply, validating the code range and the body shape
    pub fn new(code: u16, body: ReplyBody) -> Result<Self, ReplyError> {
        let class = ReplyClass::of(code)?;
        body.fits(class)?;
        let status = StatusCode::from_u16(code).map_err(|_| ReplyError::InvalidCode(code))?;

        Ok(Self {
            status,
            class,
            body,
        })
    }

    /// Success reply carrying `data`
    pub fn data<T: Serialize>(status: StatusCode, data: &T) -> Result<Self, ReplyError> {
        let data = serde_json::to_value(data)?;
        Self::new(status.as_u16(), ReplyBody::Data { data })
    }

    /// `200 OK` with `data`
    pub fn ok<T: Serialize>(data: &T) -> Result<Self, ReplyError> {
        Self::data(StatusCode::OK, data)
    }

    /// `201 Created` with `data`
    pub fn created<T: Serialize>(data: &T) -> Result<Self, ReplyError> {
        Self::data(StatusCode::CREATED, data)
    }

    /// Client or server error reply
    pub fn error(status: StatusCode, message: impl Into<String>) -> Result<Self, ReplyError> {
        Self::new(status.as_u16(), ReplyBody::error(message))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn class(&self) -> ReplyClass {
        self.class
    }

    pub fn body(&self) -> &ReplyBody {
        &self.body
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Reply construction errors
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("The code must be in the range 100 to 599, got {0}")]
    InvalidCode(u16),

    #[error("Body must have 'message' string property")]
    ExpectedMessage,

    #[error("Body must have 'data' property")]
    ExpectedData,

    #[error("Body must have 'error' object property with 'message' string property")]
    ExpectedError,

    #[error("Reply data could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classifies_codes() {
        assert_eq!(ReplyClass::of(101).unwrap(), ReplyClass::Info);
        assert_eq!(ReplyClass::of(204).unwrap(), ReplyClass::Success);
        assert_eq!(ReplyClass::of(302).unwrap(), ReplyClass::Redirect);
        assert_eq!(ReplyClass::of(404).unwrap(), ReplyClass::ClientError);
        assert_eq!(ReplyClass::of(503).unwrap(), ReplyClass::ServerError);
        assert!(matches!(ReplyClass::of(99), Err(ReplyError::InvalidCode(99))));
        assert!(matches!(ReplyClass::of(600), Err(ReplyError::InvalidCode(600))));
    }

    #[test]
    fn test_rejects_mismatched_bodies() {
        assert!(matches!(
            Reply::new(200, ReplyBody::message("hi")),
            Err(ReplyError::ExpectedData)
        ));
        assert!(matches!(
            Reply::new(301, ReplyBody::error("moved")),
            Err(ReplyError::ExpectedMessage)
        ));
        assert!(matches!(
            Reply::new(500, ReplyBody::Data { data: json!({}) }),
            Err(ReplyError::ExpectedError)
        ));
    }

    #[test]
    fn test_server_errors_are_errors() {
        let reply = Reply::error(StatusCode::SERVICE_UNAVAILABLE, "busy").unwrap();
        assert_eq!(reply.class(), ReplyClass::ServerError);
        assert_eq!(
            serde_json::to_value(reply.body()).unwrap(),
            json!({ "error": { "message": "busy" } })
        );
    }

    #[test]
    fn test_success_body_shape() {
        let reply = Reply::created(&json!({ "id": 7 })).unwrap();
        assert_eq!(reply.status(), StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(reply.body()).unwrap(),
            json!({ "data": { "id": 7 } })
        );
    }

    #[test]
    fn test_info_body_shape() {
        let reply = Reply::new(102, ReplyBody::message("processing")).unwrap();
        assert_eq!(
            serde_json::to_value(reply.body()).unwrap(),
            json!({ "message": "processing" })
        );
    }
}
