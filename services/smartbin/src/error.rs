//! Error types for the smartbin service

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sw_auth::AuthError;

/// Errors that can occur in the smartbin service
#[derive(Debug, thiserror::Error)]
pub enum SmartbinError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SmartbinError {
    /// Short machine-readable category reported to API clients
    pub fn kind(&self) -> &'static str {
        match self {
            SmartbinError::Config(_) => "config",
            SmartbinError::Network(_) => "network",
            SmartbinError::Validation(_) => "validation",
            SmartbinError::NotFound(_) => "not_found",
            SmartbinError::Auth(AuthError::InvalidHash(_)) => "config",
            SmartbinError::Auth(_) => "unauthorized",
            SmartbinError::Io(_) => "io",
            SmartbinError::Json(_) => "json",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SmartbinError::Network(_) => StatusCode::BAD_GATEWAY,
            SmartbinError::Validation(_) => StatusCode::BAD_REQUEST,
            SmartbinError::NotFound(_) => StatusCode::NOT_FOUND,
            SmartbinError::Auth(AuthError::InvalidHash(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            SmartbinError::Auth(_) => StatusCode::UNAUTHORIZED,
            SmartbinError::Config(_) | SmartbinError::Io(_) | SmartbinError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for SmartbinError {
    fn from(rejection: JsonRejection) -> Self {
        SmartbinError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for SmartbinError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self);
        }
        let body = serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Result type alias for smartbin operations
pub type Result<T> = std::result::Result<T, SmartbinError>;
