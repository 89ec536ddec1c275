/// Error types for the lead relay
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Helpdesk API error: {0}")]
    Helpdesk(String),

    #[error("Mail delivery error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            // Lead validation failures carry a structured body
            RelayError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            // Webhook auth failures return the status alone
            RelayError::Unauthorized(_) => StatusCode::UNAUTHORIZED.into_response(),
            // Everything else surfaces the message as plain text
            RelayError::Helpdesk(msg) | RelayError::Mail(msg) | RelayError::Config(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}

// Implement conversions for common error types
impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Helpdesk(err.to_string())
    }
}
