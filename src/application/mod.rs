//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Services shared by the use cases.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{AnalyzeRequest, ChatStreamRequest, GossipReply, GossipRequest, HealthReport};
pub use services::{AnalysisCache, SpiritProfileService, UpstreamHealth};
pub use use_cases::{AnalyzeMoodUseCase, SpiritChatUseCase, SpiritGossipUseCase};
