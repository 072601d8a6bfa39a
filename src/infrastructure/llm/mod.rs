//! Language-model API adapters.

pub mod chat_client;
pub mod classifier_client;
pub mod dto;
pub mod sse;

pub use chat_client::OpenAiChatClient;
pub use classifier_client::{HuggingFaceClassifier, parse_classification};
