//! Request validation errors.

use thiserror::Error;

/// Malformed or missing request input. Never retried, never forwarded upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` must not be empty")]
    EmptyText { field: &'static str },

    #[error("malformed request body: {message}")]
    MalformedBody { message: String },
}

impl ValidationError {
    /// Creates missing field error.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates empty text error.
    #[must_use]
    pub const fn empty(field: &'static str) -> Self {
        Self::EmptyText { field }
    }

    /// Creates malformed body error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBody {
            message: message.into(),
        }
    }
}
