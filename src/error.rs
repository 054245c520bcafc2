//! Coordinator and HTTP error types.
//!
//! [`LinkError`] is what the redirect and shorten services return;
//! [`AppError`] is its HTTP projection with a JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::store_error::StoreError;

/// Outcome of a failed resolution or creation.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The alias does not exist.
    #[error("alias not found")]
    NotFound,

    /// Every generated alias collided with an existing one.
    #[error("no free alias after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    /// A cache or store call failed with a non-recoverable kind.
    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl LinkError {
    pub fn backend(operation: &'static str, source: StoreError) -> Self {
        Self::Backend { operation, source }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Splits the error into its status code and serializable body.
    pub fn to_error_info(&self) -> (StatusCode, ErrorInfo) {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        (
            status,
            ErrorInfo {
                code,
                message: message.clone(),
                details: details.clone(),
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.to_error_info();
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::NotFound => AppError::not_found("Short link not found", json!({})),
            // Backend details stay in the logs.
            other => {
                tracing::error!("Request failed: {}", other);
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid request", details)
    }
}
