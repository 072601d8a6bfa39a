use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "whisp-quest",
    version,
    about = "Mood-analysis spirit proxy for Whisp Quest",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "WHISP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Bind address.
    #[arg(long, env = "WHISP_HOST")]
    pub host: Option<String>,

    /// Listening port.
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Chat model credential.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL.
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    /// Chat model name.
    #[arg(long, env = "OPENAI_MODEL")]
    pub openai_model: Option<String>,

    /// Text-classification endpoint.
    #[arg(long, env = "CLASSIFIER_URL")]
    pub classifier_url: Option<String>,

    /// Classifier credential.
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub classifier_token: Option<String>,

    /// Upstream request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub upstream_timeout: Option<u64>,
}
