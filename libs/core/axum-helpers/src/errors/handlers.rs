use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::ErrorResponse;

/// Handler for 404 Not Found errors.
///
/// Used as the router's fallback for unmatched paths.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::from_message(
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
