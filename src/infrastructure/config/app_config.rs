//! Application configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::domain::entities::ApiKey;
use crate::infrastructure::texture::TextureSourceConfig;

pub(super) const APP_NAME: &str = "whisp-quest";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "whispquest";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Default emotion classifier endpoint.
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, merged from file, environment, and CLI.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stdout when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,

    /// External APIs.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Memoization of analysis results.
    #[serde(default)]
    pub analysis_cache: AnalysisCacheConfig,

    /// Texture sources.
    #[serde(default)]
    pub textures: TextureSourceConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Returns the socket address to bind.
    ///
    /// # Errors
    /// Returns error if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// External API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Credential for the chat model. Read from the environment only.
    #[serde(skip)]
    pub openai_api_key: Option<ApiKey>,

    /// Chat API base URL.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Chat model name.
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Text-classification endpoint.
    #[serde(default = "default_classifier_url")]
    pub classifier_url: String,

    /// Credential for the classifier. Read from the environment only.
    #[serde(skip)]
    pub classifier_token: Option<ApiKey>,

    /// Timeout applied to every upstream call, in seconds.
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            classifier_url: default_classifier_url(),
            classifier_token: None,
            timeout_secs: default_upstream_timeout(),
        }
    }
}

/// Analysis cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisCacheConfig {
    /// Maximum number of memoized analyses.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Seconds before a memoized analysis expires.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for AnalysisCacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3001
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_classifier_url() -> String {
    DEFAULT_CLASSIFIER_URL.to_string()
}

const fn default_upstream_timeout() -> u64 {
    15
}

const fn default_cache_capacity() -> usize {
    256
}

const fn default_cache_ttl() -> u64 {
    600
}

impl AppConfig {
    /// Merges CLI arguments (and their environment fallbacks) into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(base_url) = args.openai_base_url {
            self.upstream.openai_base_url = base_url;
        }
        if let Some(model) = args.openai_model {
            self.upstream.openai_model = model;
        }
        if let Some(url) = args.classifier_url {
            self.upstream.classifier_url = url;
        }
        if let Some(timeout) = args.upstream_timeout {
            self.upstream.timeout_secs = timeout;
        }
        if let Some(key) = args.openai_api_key.and_then(ApiKey::new) {
            self.upstream.openai_api_key = Some(key);
        }
        if let Some(token) = args.classifier_token.and_then(ApiKey::new) {
            self.upstream.classifier_token = Some(token);
        }
    }

    /// Whether the chat model credential is present.
    #[must_use]
    pub const fn openai_configured(&self) -> bool {
        self.upstream.openai_api_key.is_some()
    }
}
