use crate::service::ServiceError;
use crate::session::SessionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::error::Error;
use std::fmt;
use tracing::error;

#[derive(Debug)]
pub enum WebError {
    ServiceError { source: ServiceError },
    /// A request handler panicked while holding the database.
    DatabasePoisoned,
    BlockingTaskFailed { source: tokio::task::JoinError },
    ServerError { source: hyper::Error },
}
pub type Result<T> = std::result::Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::ServiceError {
                source: ServiceError::NotFound,
            } => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response(),
            Self::ServiceError {
                source: ServiceError::Invalid { errors },
            } => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors }))).into_response(),
            Self::ServiceError {
                source: ServiceError::Conflict { message },
            } => (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response(),
            other => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

// Error Boilerplate (Error display, conversion and source)
impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceError { source } => write!(f, "{}", source),
            Self::ServerError { source } => write!(f, "HTTP server failed: {}", source),
            other => write!(f, "Error During Request Handling ({:?})", other),
        }
    }
}
impl From<ServiceError> for WebError {
    fn from(error: ServiceError) -> Self {
        Self::ServiceError { source: error }
    }
}
impl From<SessionError> for WebError {
    fn from(error: SessionError) -> Self {
        Self::ServiceError {
            source: ServiceError::from(error),
        }
    }
}
impl From<tokio::task::JoinError> for WebError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::BlockingTaskFailed { source: error }
    }
}
impl From<hyper::Error> for WebError {
    fn from(error: hyper::Error) -> Self {
        Self::ServerError { source: error }
    }
}
impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ServiceError { ref source } => Some(source),
            Self::BlockingTaskFailed { ref source } => Some(source),
            Self::ServerError { ref source } => Some(source),
            Self::DatabasePoisoned => None,
        }
    }
}
