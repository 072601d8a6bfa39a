//! Use case implementations.

mod analyze_mood_use_case;
mod spirit_chat_use_case;
mod spirit_gossip_use_case;

pub use analyze_mood_use_case::AnalyzeMoodUseCase;
pub use spirit_chat_use_case::SpiritChatUseCase;
pub use spirit_gossip_use_case::SpiritGossipUseCase;
