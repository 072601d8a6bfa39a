//! Chat model port definition.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::errors::UpstreamError;

/// Stream of text fragments from a chat model.
pub type TextStream = BoxStream<'static, Result<String, UpstreamError>>;

/// A single-turn prompt for a chat model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// System instruction.
    pub system: String,
    /// User message.
    pub user: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl ChatRequest {
    /// Creates a request with default sampling settings.
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: 120,
            temperature: 0.9,
        }
    }

    /// Overrides the token limit.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Port for a chat completion service.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Whether a credential is available.
    fn is_configured(&self) -> bool;

    /// Returns the full completion for `request`.
    async fn complete(&self, request: ChatRequest) -> Result<String, UpstreamError>;

    /// Streams the completion for `request` fragment by fragment.
    async fn stream(&self, request: ChatRequest) -> Result<TextStream, UpstreamError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::StreamExt;

    /// Mock chat port replying with a fixed text.
    pub struct MockChatPort {
        reply: Option<String>,
        fail: bool,
        calls: AtomicUsize,
        last_request: Mutex<Option<ChatRequest>>,
    }

    impl MockChatPort {
        /// Creates a configured mock that replies with `reply`.
        pub fn replying(reply: impl Into<String>) -> Self {
            Self {
                reply: Some(reply.into()),
                fail: false,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        /// Creates a mock with no credential.
        pub fn unconfigured() -> Self {
            Self {
                reply: None,
                fail: false,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        /// Creates a configured mock whose calls fail.
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::replying("")
            }
        }

        /// Number of upstream calls made.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Last request received.
        pub fn last_request(&self) -> Option<ChatRequest> {
            self.last_request.lock().unwrap().clone()
        }

        fn respond(&self, request: ChatRequest) -> Result<String, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            let Some(reply) = &self.reply else {
                return Err(UpstreamError::NotConfigured { service: "mock" });
            };
            if self.fail {
                return Err(UpstreamError::Status {
                    service: "mock",
                    status: 502,
                    message: "bad gateway".to_string(),
                });
            }
            Ok(reply.clone())
        }
    }

    #[async_trait]
    impl ChatPort for MockChatPort {
        fn is_configured(&self) -> bool {
            self.reply.is_some()
        }

        async fn complete(&self, request: ChatRequest) -> Result<String, UpstreamError> {
            self.respond(request)
        }

        async fn stream(&self, request: ChatRequest) -> Result<TextStream, UpstreamError> {
            let reply = self.respond(request)?;
            let fragments: Vec<Result<String, UpstreamError>> = reply
                .split_inclusive(' ')
                .map(|s| Ok(s.to_string()))
                .collect();
            Ok(futures_util::stream::iter(fragments).boxed())
        }
    }
}
