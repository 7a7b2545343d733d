//! Error handling for the gamedex HTTP layer

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gamedex_db::StoreError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

/// Body returned when listing games fails.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching game";

/// Standard error response format, nested under the `error` key
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    /// Missing record on a write path; clients see a 400.
    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    /// Store failure on a write path.
    #[error(transparent)]
    Store(StoreError),

    /// Any failure while listing; rendered as `{"error": "Error fetching game"}`.
    #[error("failed to fetch games: {0}")]
    Fetch(anyhow::Error),

    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Wrap a failure from the list path
    pub fn fetch(error: impl Into<anyhow::Error>) -> Self {
        Self::Fetch(error.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::NotFound { .. } | AppError::Store(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Fetch(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { id } => AppError::not_found(format!("Game {} not found", id)),
            other => AppError::Store(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(
            vec![json!({ "field": "body", "error": rejection.body_text() })],
            "Request body is not valid JSON",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_id = Uuid::new_v4();

        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| OffsetDateTime::now_utc().to_string());

        let (error_code, message, details) = match self {
            AppError::Fetch(source) => {
                tracing::error!(
                    error_id = %error_id,
                    status_code = %status.as_u16(),
                    error = %source,
                    "failed to fetch games"
                );
                return (status, Json(json!({ "error": FETCH_FAILED_MESSAGE }))).into_response();
            }
            AppError::Validation {
                details,
                code,
                message,
            } => (code, message, details),
            AppError::NotFound { message, code } => (code, message, Vec::new()),
            AppError::Store(e) => ("store_error".to_string(), e.to_string(), Vec::new()),
            AppError::Timeout => (
                "timeout".to_string(),
                "Request timed out".to_string(),
                Vec::new(),
            ),
            AppError::Internal(e) => ("internal_error".to_string(), e.to_string(), Vec::new()),
        };

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                error = %message,
                "Request error"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request error"
            );
        }

        // Internal details stay in the logs for release builds
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let body = ErrorBody {
            code: error_code,
            message,
            details,
            trace_id: error_id.to_string(),
            timestamp,
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}
