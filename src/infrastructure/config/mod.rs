//! Application configuration.

pub mod app_config;
pub mod args;
pub mod loader;

pub use app_config::{
    AnalysisCacheConfig, AppConfig, LogLevel, ServerConfig, UpstreamConfig,
    DEFAULT_CLASSIFIER_URL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
pub use args::CliArgs;
pub use loader::{ConfigError, ConfigLoader, ConfigSource};
