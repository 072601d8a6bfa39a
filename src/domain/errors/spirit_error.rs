//! Errors surfaced by the spirit use cases.

use thiserror::Error;

use super::{UpstreamError, ValidationError};

/// Either the request was invalid or an upstream call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SpiritError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
