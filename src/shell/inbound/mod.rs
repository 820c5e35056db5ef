// Inbound JSON handlers for the engine operations.

pub mod jobs;
pub mod payments;
pub mod reports;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::errors::KhataError;
use crate::core::ports::StoreError;

/// Map the error taxonomy onto HTTP statuses: validation 422, overpayment 409
/// (with the maximum acceptable amount in the body), not-found 404, store
/// failures 500.
pub fn error_response(err: KhataError) -> Response {
    let message = err.to_string();
    match err {
        KhataError::Validation(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": message })),
        )
            .into_response(),
        KhataError::Overpayment { max_acceptable, .. } => (
            StatusCode::CONFLICT,
            Json(json!({ "error": message, "maxAcceptable": max_acceptable })),
        )
            .into_response(),
        KhataError::NotFound { .. } => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
        }
        KhataError::Store(StoreError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
        }
        KhataError::Store(_) => {
            tracing::error!(error = %message, "store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response()
        }
    }
}
