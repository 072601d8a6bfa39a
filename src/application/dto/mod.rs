//! Data transfer objects for the application layer.

mod spirit_dto;

pub use spirit_dto::{
    AnalyzeRequest, ChatStreamRequest, Gossip, GossipReply, GossipRequest, HealthReport,
    require_text,
};
