use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::analysis::{AnalysisError, FailureKind};

/// Error body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    status: StatusCode,
    user_message: &str,
    internal_error: Option<&str>,
) -> Response {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!(status = status.as_u16(), "Internal error: {}", internal_msg);
    }

    (
        status,
        Json(ErrorResponse {
            detail: user_message.to_string(),
        }),
    )
        .into_response()
}

/// Failure of an HTTP request, rendered as `{"detail": ...}`
#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    InvalidBody(JsonRejection),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self::Analysis(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Analysis(err) => match err.kind() {
                FailureKind::InvalidInput => {
                    // Rejected input is the caller's problem, not an application fault
                    tracing::debug!(reason = %err, "Rejected analysis request");
                    create_safe_error_response(StatusCode::BAD_REQUEST, &err.public_message(), None)
                }
                FailureKind::ServiceFailure => create_safe_error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &err.public_message(),
                    Some(&err.to_string()),
                ),
            },
            Self::InvalidBody(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Malformed request body");
                create_safe_error_response(StatusCode::BAD_REQUEST, "Invalid request body", None)
            }
        }
    }
}

/// Render a handler panic as a generic 500
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    create_safe_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Analysis failed: internal error",
        Some(&format!("handler panicked: {cause}")),
    )
}
