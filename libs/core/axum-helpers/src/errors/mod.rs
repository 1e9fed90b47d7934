pub mod handlers;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body returned to clients when an unexpected server-side failure occurs.
/// The real error is logged; this text is all the caller ever sees.
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Standard error response body.
///
/// Exactly one of the two fields is set:
/// - `message`: a single human-readable error (not found, bad identifier,
///   server failure)
/// - `errors`: the full list of violated rules for a rejected request body
///
/// # JSON Examples
///
/// ```json
/// { "message": "User not found" }
/// { "errors": ["First name must be at least 3 characters long."] }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Every violated rule, reported together
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            message: None,
            errors: Some(errors),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain error enums convert into this at the HTTP boundary; the mapping
/// here is the single place where status codes and response bodies are
/// decided.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Conflict: {0:?}")]
    Conflict(Vec<String>),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                (e.status(), ErrorResponse::from_message(e.body_text()))
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::from_message(msg))
            }
            AppError::Validation(rules) => {
                tracing::info!("Validation failed: {:?}", rules);
                (StatusCode::BAD_REQUEST, ErrorResponse::from_errors(rules))
            }
            AppError::Conflict(fields) => {
                tracing::info!("Conflict: {:?}", fields);
                (StatusCode::BAD_REQUEST, ErrorResponse::from_errors(fields))
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::from_message(msg))
            }
            AppError::InternalServerError(msg) => {
                // Details stay server-side; the caller gets an opaque body.
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::from_message(SERVER_ERROR_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten `validator` output into one message per violated rule.
///
/// Rules declared with an explicit message report that text; anything else
/// falls back to a generic per-field message. The result is sorted so
/// response bodies are deterministic.
pub fn collect_rule_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for field '{}'.", field),
            })
        })
        .collect();
    messages.sort();
    messages
}
