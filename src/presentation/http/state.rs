//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::application::{
    AnalysisCache, AnalyzeMoodUseCase, SpiritChatUseCase, SpiritGossipUseCase, UpstreamHealth,
};
use crate::infrastructure::texture::TextureCache;

/// Handler state. Cloned per request; everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    /// Mood analysis.
    pub analyze: Arc<AnalyzeMoodUseCase>,
    /// Spirit-to-spirit gossip.
    pub gossip: Arc<SpiritGossipUseCase>,
    /// Streaming spirit chat.
    pub chat: Arc<SpiritChatUseCase>,
    /// Memoized analyses, reported by `/health`.
    pub analysis_cache: Arc<AnalysisCache>,
    /// Soft-fallback counter, reported by `/health`.
    pub health: Arc<UpstreamHealth>,
    /// Shared decoded textures.
    pub textures: Arc<TextureCache>,
    /// Whether the chat credential is present.
    pub openai_configured: bool,
}
