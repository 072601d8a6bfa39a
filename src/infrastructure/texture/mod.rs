//! Texture loading infrastructure.
//!
//! This module provides:
//! - A single-flight in-memory texture cache
//! - Network and filesystem texture sources
//! - Shared decoding on the blocking pool

pub mod cache;
mod decode;
pub mod file_source;
pub mod http_source;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::ports::TextureSourcePort;

pub use cache::{CacheStats, TextureCache};
pub use file_source::FileTextureSource;
pub use http_source::HttpTextureSource;

/// Configuration for texture sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSourceConfig {
    /// Directory served by the filesystem source. Remote loading when unset.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Textures wider than this are downsized after decoding. `0` disables.
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Locators loaded into the cache at startup.
    #[serde(default)]
    pub preload: Vec<String>,
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_width() -> u32 {
    1024
}

impl Default for TextureSourceConfig {
    fn default() -> Self {
        Self {
            root: None,
            timeout_secs: default_timeout_secs(),
            max_width: default_max_width(),
            preload: Vec::new(),
        }
    }
}

/// Builds the texture source selected by `config`.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn source_from_config(
    config: &TextureSourceConfig,
) -> crate::domain::errors::TextureResult<Arc<dyn TextureSourcePort>> {
    match &config.root {
        Some(root) => Ok(Arc::new(FileTextureSource::new(root, config.max_width))),
        None => Ok(Arc::new(HttpTextureSource::new(config)?)),
    }
}
