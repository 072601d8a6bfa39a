use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// Locates and reads the TOML configuration file.
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a new `ConfigLoader` for the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a loader with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Loads the application configuration.
    ///
    /// A missing file yields defaults. A file that fails to parse also yields
    /// defaults, with the parse error reported in the returned [`ConfigSource`].
    /// Nothing is logged here; callers log the source once logging is set up.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an existing file cannot be read.
    pub fn load_config(
        &self,
        path_override: Option<&Path>,
    ) -> Result<(AppConfig, ConfigSource), ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        if !config_path.exists() {
            return Ok((AppConfig::default(), ConfigSource::Missing(config_path)));
        }

        let content = fs::read_to_string(&config_path)?;
        match Self::parse(&content) {
            Ok(config) => Ok((config, ConfigSource::File(config_path))),
            Err(error) => Ok((
                AppConfig::default(),
                ConfigSource::Invalid {
                    path: config_path,
                    error,
                },
            )),
        }
    }

    /// Parses `content` strictly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TomlDe` on invalid TOML.
    pub fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Where a loaded configuration came from.
#[derive(Debug)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file at this path; defaults are in use.
    Missing(PathBuf),
    /// The file failed to parse; defaults are in use.
    Invalid {
        /// Offending file.
        path: PathBuf,
        /// Parse failure.
        error: ConfigError,
    },
}

impl ConfigSource {
    /// Logs how the configuration was obtained.
    pub fn log(&self) {
        match self {
            Self::File(path) => info!(path = %path.display(), "Loaded config file"),
            Self::Missing(path) => {
                info!(path = %path.display(), "Config file not found, using defaults");
            }
            Self::Invalid { path, error } => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse config file, using defaults"
                );
            }
        }
    }
}
