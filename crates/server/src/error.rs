use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::negotiate::ResponseFormat;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("No text submitted to analyze!")]
    MissingText,

    #[error("Keyword(s) are missing! Keywords should be passed as an array.")]
    MissingKeywords,

    #[error("Distance is missing or it isn't an unsigned integer value.")]
    InvalidDistance,

    /// The body could not be read or decoded.
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    #[error("{0}")]
    Pipeline(#[from] keyscan::PipelineError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MissingText
            | ServerError::MissingKeywords
            | ServerError::InvalidDistance
            | ServerError::Pipeline(_)
            | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Body { status, .. } => *status,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::MissingText => "missing_text",
            ServerError::MissingKeywords => "missing_keywords",
            ServerError::InvalidDistance => "invalid_distance",
            ServerError::Body { .. } => "bad_body",
            ServerError::Pipeline(_) => "pipeline",
            ServerError::Internal(_) => "internal",
            ServerError::Config(_) => "config",
            ServerError::NotFound => "not_found",
        }
    }

    /// Render in the requested format.
    ///
    /// Server-side failures are logged and answered with a generic message.
    pub fn render(self, format: ResponseFormat) -> Response {
        let status = self.status_code();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        format.render(status, &ErrorResponse { error })
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.render(ResponseFormat::Json)
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("analysis task failed: {err}"))
    }
}
