//! Spirit gossip use case implementation.

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::dto::{GossipReply, GossipRequest};
use crate::domain::errors::SpiritError;
use crate::domain::ports::{ChatPort, ChatRequest};

/// Lets one spirit answer another in character.
#[derive(Clone)]
pub struct SpiritGossipUseCase {
    chat: Arc<dyn ChatPort>,
}

impl SpiritGossipUseCase {
    /// Creates new gossip use case.
    #[must_use]
    pub const fn new(chat: Arc<dyn ChatPort>) -> Self {
        Self { chat }
    }

    /// Executes gossip with provided request.
    ///
    /// # Errors
    /// Returns error if a field is missing or the chat model fails.
    pub async fn execute(&self, request: GossipRequest) -> Result<GossipReply, SpiritError> {
        let gossip = request.validate()?;
        debug!(from = %gossip.from, to = %gossip.to, "Relaying gossip");

        let prompt = ChatRequest::new(
            format!(
                "You are {}, a small forest spirit gossiping with {}. \
                 Reply in one or two playful sentences, staying in character.",
                gossip.from, gossip.to
            ),
            gossip.text,
        );

        let reply = self.chat.complete(prompt).await.map_err(|e| {
            error!(error = %e, "Gossip reply failed");
            e
        })?;

        Ok(GossipReply { reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{UpstreamError, ValidationError};
    use crate::domain::ports::mocks::MockChatPort;

    #[tokio::test]
    async fn test_successful_gossip() {
        let chat = Arc::new(MockChatPort::replying("Moss snores louder than thunder!"));
        let use_case = SpiritGossipUseCase::new(chat.clone());

        let reply = use_case
            .execute(GossipRequest::new("Pip", "Moss", "Did you hear the owl?"))
            .await
            .unwrap();

        assert_eq!(reply.reply, "Moss snores louder than thunder!");
        let request = chat.last_request().unwrap();
        assert!(request.system.contains("Pip"));
        assert!(request.system.contains("Moss"));
        assert_eq!(request.user, "Did you hear the owl?");
    }

    #[tokio::test]
    async fn test_empty_text_is_accepted() {
        let chat = Arc::new(MockChatPort::replying("..."));
        let use_case = SpiritGossipUseCase::new(chat.clone());

        let result = use_case.execute(GossipRequest::new("Pip", "Moss", "")).await;

        assert!(result.is_ok());
        assert_eq!(chat.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_is_not_sent_upstream() {
        let chat = Arc::new(MockChatPort::replying("..."));
        let use_case = SpiritGossipUseCase::new(chat.clone());
        let request = GossipRequest {
            from: None,
            ..GossipRequest::new("", "Moss", "hi")
        };

        let result = use_case.execute(request).await;

        assert!(matches!(
            result,
            Err(SpiritError::Validation(ValidationError::MissingField { field: "from" }))
        ));
        assert_eq!(chat.calls(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_chat_is_an_error() {
        let use_case = SpiritGossipUseCase::new(Arc::new(MockChatPort::unconfigured()));

        let result = use_case.execute(GossipRequest::new("Pip", "Moss", "hi")).await;

        assert!(matches!(
            result,
            Err(SpiritError::Upstream(UpstreamError::NotConfigured { .. }))
        ));
    }
}
