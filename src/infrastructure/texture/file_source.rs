//! Filesystem texture source.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::domain::entities::TextureKey;
use crate::domain::errors::{TextureError, TextureResult};
use crate::domain::ports::TextureSourcePort;

use super::decode::decode_texture;

/// Reads textures from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileTextureSource {
    root: PathBuf,
    max_width: u32,
}

impl FileTextureSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, max_width: u32) -> Self {
        Self {
            root: root.into(),
            max_width,
        }
    }

    /// Resolves a locator below the root. Absolute paths and `..` are rejected.
    fn resolve(&self, key: &TextureKey) -> TextureResult<PathBuf> {
        let relative = Path::new(key.as_str());
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if key.as_str().is_empty() || escapes {
            return Err(TextureError::InvalidLocator(format!(
                "path escapes texture root: {key}"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl TextureSourcePort for FileTextureSource {
    async fn fetch(&self, key: &TextureKey) -> TextureResult<image::DynamicImage> {
        let path = self.resolve(key)?;
        debug!(path = %path.display(), "Reading texture from disk");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| TextureError::Io(format!("{}: {e}", path.display())))?;
        decode_texture(Bytes::from(bytes), self.max_width).await
    }
}
