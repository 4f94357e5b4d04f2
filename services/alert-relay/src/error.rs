//! Error types for the alert relay

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur while relaying an alert
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Authorization header missing")]
    MissingCredential,

    #[error("Authorization token does not match")]
    InvalidCredential,

    #[error("Invalid alert payload: {0}")]
    InvalidFormat(#[source] serde_json::Error),

    #[error("Alert payload is missing required fields")]
    MissingFields,

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("ServerChan API returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RelayError {
    /// HTTP status returned to the webhook caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingCredential | RelayError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            RelayError::InvalidFormat(_) | RelayError::MissingFields => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text reply for the webhook caller. Never carries downstream details.
    pub fn reply_text(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "Method not allowed",
            RelayError::MissingCredential => "Authorization header required",
            RelayError::InvalidCredential => "Invalid token",
            RelayError::InvalidFormat(_) => "Invalid JSON format",
            RelayError::MissingFields => "Missing required fields",
            RelayError::BodyRead(_) => "Error reading request body",
            RelayError::Http(_) | RelayError::Upstream { .. } => "Error sending to ServerChan",
            RelayError::Config(_) | RelayError::Io(_) | RelayError::Json(_) => {
                "Internal server error"
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.reply_text()).into_response()
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
