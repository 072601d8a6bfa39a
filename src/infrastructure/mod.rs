//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Classifier and chat model HTTP clients.
pub mod llm;
/// Texture cache and sources.
pub mod texture;

pub use config::{AppConfig, CliArgs, ConfigLoader, ConfigSource, LogLevel};
pub use llm::{HuggingFaceClassifier, OpenAiChatClient};
pub use texture::{TextureCache, TextureSourceConfig, source_from_config};
