//! Errors raised by external classification and chat APIs.

use thiserror::Error;

/// Failure talking to an upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum UpstreamError {
    #[error("{service} credential is not configured")]
    NotConfigured { service: &'static str },

    #[error("request to {service} timed out")]
    Timeout { service: &'static str },

    #[error("network error calling {service}: {message}")]
    Transport { service: &'static str, message: String },

    #[error("{service} returned HTTP {status}: {message}")]
    Status {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("{service} reported an error: {message}")]
    Reported { service: &'static str, message: String },

    #[error("malformed response from {service}: {message}")]
    Malformed { service: &'static str, message: String },
}

impl UpstreamError {
    /// Creates malformed response error.
    #[must_use]
    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            service,
            message: message.into(),
        }
    }

    /// Creates upstream-reported error.
    #[must_use]
    pub fn reported(service: &'static str, message: impl Into<String>) -> Self {
        Self::Reported {
            service,
            message: message.into(),
        }
    }

    /// Maps a transport failure, keeping timeouts distinct.
    #[must_use]
    pub fn from_reqwest(service: &'static str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { service }
        } else {
            Self::Transport {
                service,
                message: err.to_string(),
            }
        }
    }

    /// Name of the upstream service involved.
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::NotConfigured { service }
            | Self::Timeout { service }
            | Self::Transport { service, .. }
            | Self::Status { service, .. }
            | Self::Reported { service, .. }
            | Self::Malformed { service, .. } => service,
        }
    }
}
