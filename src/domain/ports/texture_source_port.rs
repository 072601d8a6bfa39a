//! Port definition for texture sources.

use async_trait::async_trait;

use crate::domain::entities::TextureKey;
use crate::domain::errors::TextureResult;

/// Port for fetching and decoding a texture.
/// Implementations must be thread-safe.
#[async_trait]
pub trait TextureSourcePort: Send + Sync {
    /// Fetches the resource behind `key` and decodes it.
    async fn fetch(&self, key: &TextureKey) -> TextureResult<image::DynamicImage>;
}
