use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use service::site::view::{MSG_CONFLICT, MSG_INVALID};
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": ..., "message": ..., "code": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
    pub code: Option<u16>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        Self { status, error: error.to_string(), message, code: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = Some(e.code());
        let mut err = match &e {
            ServiceError::Validation(msg) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(format!("{MSG_INVALID}: {msg}")))
            }
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg.clone())),
            ServiceError::ConcurrencyConflict { .. } => {
                JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(MSG_CONFLICT.to_string()))
            }
            ServiceError::Db(_) => {
                error!(err = %e, "database failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", None)
            }
        };
        err.code = code;
        err
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.error,
            "message": self.message,
            "code": self.code,
        });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
