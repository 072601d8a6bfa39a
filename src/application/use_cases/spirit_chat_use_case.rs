//! Streaming spirit chat use case implementation.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::future::ready;
use futures_util::stream::{self, BoxStream};
use tracing::{debug, info};

use crate::application::dto::{ChatStreamRequest, require_text};
use crate::application::services::{UpstreamHealth, palette};
use crate::domain::entities::Mood;
use crate::domain::errors::ValidationError;
use crate::domain::ports::{ChatPort, ChatRequest};

/// Streams a spirit's answer fragment by fragment.
#[derive(Clone)]
pub struct SpiritChatUseCase {
    chat: Arc<dyn ChatPort>,
    health: Arc<UpstreamHealth>,
}

impl SpiritChatUseCase {
    /// Creates new chat use case.
    #[must_use]
    pub const fn new(chat: Arc<dyn ChatPort>, health: Arc<UpstreamHealth>) -> Self {
        Self { chat, health }
    }

    /// Starts streaming the answer to `request`.
    ///
    /// Falls back to the mood's fixed line when the chat model is not
    /// configured or fails before the first fragment. A failure after that
    /// ends the stream early.
    ///
    /// # Errors
    /// Returns error if the text is missing or blank.
    pub async fn stream(
        &self,
        request: ChatStreamRequest,
    ) -> Result<BoxStream<'static, String>, ValidationError> {
        let mood = request.mood();
        let text = require_text("text", request.text.as_deref())?;

        if !self.chat.is_configured() {
            debug!(mood = %mood, "Chat model not configured, streaming fixed line");
            return Ok(fixed_line(mood));
        }

        let prompt = ChatRequest::new(
            format!(
                "You are a {mood} forest wisp talking with a traveller. \
                 Answer warmly in at most three short sentences."
            ),
            text,
        );

        let mut upstream = match self.chat.stream(prompt).await {
            Ok(upstream) => upstream,
            Err(e) => {
                self.health.record_failure(&e);
                return Ok(fixed_line(mood));
            }
        };

        match upstream.next().await {
            Some(Ok(first)) => {
                info!(mood = %mood, "Streaming spirit chat");
                let health = Arc::clone(&self.health);
                let rest = upstream.scan((), move |_, fragment| {
                    ready(match fragment {
                        Ok(fragment) => Some(fragment),
                        Err(e) => {
                            health.record_failure(&e);
                            None
                        }
                    })
                });
                Ok(stream::once(ready(first)).chain(rest).boxed())
            }
            Some(Err(e)) => {
                self.health.record_failure(&e);
                Ok(fixed_line(mood))
            }
            None => {
                debug!("Chat model returned no content, streaming fixed line");
                Ok(fixed_line(mood))
            }
        }
    }
}

/// The fixed line for `mood`, one word per fragment.
fn fixed_line(mood: Mood) -> BoxStream<'static, String> {
    let words: Vec<String> = palette(mood)
        .line
        .split_inclusive(' ')
        .map(str::to_string)
        .collect();
    stream::iter(words).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::UpstreamError;
    use crate::domain::ports::TextStream;
    use crate::domain::ports::mocks::MockChatPort;
    use async_trait::async_trait;

    fn request(text: Option<&str>, mood: Option<&str>) -> ChatStreamRequest {
        ChatStreamRequest {
            text: text.map(str::to_string),
            mood: mood.map(str::to_string),
        }
    }

    async fn collect(use_case: &SpiritChatUseCase, request: ChatStreamRequest) -> Vec<String> {
        use_case.stream(request).await.unwrap().collect().await
    }

    /// Yields one fragment and then fails.
    struct BreakingChat;

    #[async_trait]
    impl ChatPort for BreakingChat {
        fn is_configured(&self) -> bool {
            true
        }

        async fn complete(&self, _request: ChatRequest) -> Result<String, UpstreamError> {
            unreachable!()
        }

        async fn stream(&self, _request: ChatRequest) -> Result<TextStream, UpstreamError> {
            Ok(stream::iter(vec![
                Ok("Hello ".to_string()),
                Err(UpstreamError::Timeout { service: "chat" }),
                Ok("never".to_string()),
            ])
            .boxed())
        }
    }

    #[tokio::test]
    async fn test_streams_upstream_fragments() {
        let health = Arc::new(UpstreamHealth::new());
        let chat = Arc::new(MockChatPort::replying("The moss is soft tonight."));
        let use_case = SpiritChatUseCase::new(chat.clone(), health);

        let fragments = collect(&use_case, request(Some("hi"), Some("calm"))).await;

        assert_eq!(fragments.concat(), "The moss is soft tonight.");
        assert!(fragments.len() > 1);
        assert!(chat.last_request().unwrap().system.contains("calm"));
    }

    #[tokio::test]
    async fn test_unconfigured_streams_fixed_line() {
        let health = Arc::new(UpstreamHealth::new());
        let use_case = SpiritChatUseCase::new(Arc::new(MockChatPort::unconfigured()), health);

        let fragments = collect(&use_case, request(Some("hi"), Some("Fear"))).await;

        assert_eq!(fragments.concat(), palette(Mood::Fear).line);
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back() {
        let health = Arc::new(UpstreamHealth::new());
        let use_case = SpiritChatUseCase::new(Arc::new(MockChatPort::failing()), health.clone());

        let fragments = collect(&use_case, request(Some("hi"), Some("unknown"))).await;

        assert_eq!(fragments.concat(), palette(Mood::Neutral).line);
        assert_eq!(health.failures(), 1);
    }

    #[tokio::test]
    async fn test_failure_mid_stream_ends_stream() {
        let health = Arc::new(UpstreamHealth::new());
        let use_case = SpiritChatUseCase::new(Arc::new(BreakingChat), health.clone());

        let fragments = collect(&use_case, request(Some("hi"), None)).await;

        assert_eq!(fragments, vec!["Hello "]);
        assert_eq!(health.failures(), 1);
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() {
        let health = Arc::new(UpstreamHealth::new());
        let chat = Arc::new(MockChatPort::replying("unused"));
        let use_case = SpiritChatUseCase::new(chat.clone(), health);

        let result = use_case.stream(request(None, Some("joy"))).await;

        assert!(matches!(result, Err(ValidationError::MissingField { field: "text" })));
        assert_eq!(chat.calls(), 0);
    }
}
