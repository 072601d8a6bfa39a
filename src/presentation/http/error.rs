//! Mapping of domain errors to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::domain::errors::{SpiritError, UpstreamError, ValidationError};

/// Error body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub error: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Failure of a request handler.
#[derive(Debug)]
pub enum ApiError {
    /// The request was rejected before reaching any upstream.
    Validation(ValidationError),
    /// An upstream call failed and no fallback applies.
    Upstream(UpstreamError),
}

impl ApiError {
    /// Status code and body for this error.
    #[must_use]
    pub fn parts(&self) -> (StatusCode, ErrorBody) {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, validation_body(e)),
            Self::Upstream(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "upstream_error",
                    message: upstream_message(e).to_string(),
                },
            ),
        }
    }
}

/// Body describing a validation failure.
#[must_use]
pub fn validation_body(error: &ValidationError) -> ErrorBody {
    let code = match error {
        ValidationError::MissingField { .. } => "missing_field",
        ValidationError::EmptyText { .. } => "empty_text",
        ValidationError::MalformedBody { .. } => "malformed_body",
    };
    ErrorBody {
        error: code,
        message: error.to_string(),
    }
}

fn upstream_message(error: &UpstreamError) -> &'static str {
    match error {
        UpstreamError::NotConfigured { .. } => "the spirits are not configured to speak",
        UpstreamError::Timeout { .. } => "the spirits took too long to answer",
        _ => "the spirits could not be reached",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upstream(e) = &self {
            error!(service = e.service(), error = %e, "Request failed upstream");
        }
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        Self::Upstream(e)
    }
}

impl From<SpiritError> for ApiError {
    fn from(e: SpiritError) -> Self {
        match e {
            SpiritError::Validation(e) => Self::Validation(e),
            SpiritError::Upstream(e) => Self::Upstream(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::malformed(rejection.body_text()))
    }
}
