//! Error types for the runtime.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use foundry_common::ErrorDetail;

use crate::handler::{HandlerError, ResolveError};

/// Errors produced while serving a request, shared by every surface.
///
/// Each surface converts this into its own failure shape; the REST
/// conversion lives here, the others next to their adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Batch endpoint requires array input")]
    BatchRequiresArray,

    #[error("Action request must be a JSON object")]
    ActionRequestNotObject,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configured handler reference cannot be served.
    Configuration,
    /// The request was rejected before reaching the handler.
    Validation,
    /// The handler, or the task running it, failed.
    Execution,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Resolve(_) => ErrorKind::Configuration,
            Error::InvalidJson(_)
            | Error::BatchRequiresArray
            | Error::ActionRequestNotObject
            | Error::UnknownAction(_) => ErrorKind::Validation,
            Error::Handler(_) | Error::Internal(_) => ErrorKind::Execution,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Configuration | ErrorKind::Execution => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorDetail {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_json() -> Error {
        Error::InvalidJson(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(invalid_json().kind(), ErrorKind::Validation);
        assert_eq!(Error::BatchRequiresArray.kind(), ErrorKind::Validation);
        assert_eq!(Error::ActionRequestNotObject.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::from(ResolveError::Import("m".to_string())).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(Error::from(HandlerError::new("x")).kind(), ErrorKind::Execution);
    }

    #[test]
    fn test_messages_pass_through() {
        assert_eq!(invalid_json().to_string(), "Invalid JSON in request body");
        assert_eq!(Error::from(HandlerError::new("boom")).to_string(), "boom");
        assert_eq!(
            Error::UnknownAction("train".to_string()).to_string(),
            "Unknown action: train"
        );
    }

    #[test]
    fn test_rest_status_codes() {
        assert_eq!(
            Error::BatchRequiresArray.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::from(HandlerError::new("boom")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::from(ResolveError::Configuration("x".to_string()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
