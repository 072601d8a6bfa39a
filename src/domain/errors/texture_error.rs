//! Texture loading error types.

use thiserror::Error;

use crate::domain::entities::TextureKey;

/// Result type for texture operations.
pub type TextureResult<T> = std::result::Result<T, TextureError>;

/// Errors that can occur while loading textures.
///
/// `Clone` so a single pending load can hand the same failure to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    /// The locator cannot be served by the configured source.
    #[error("invalid texture locator: {0}")]
    InvalidLocator(String),
    /// Failed to decode image bytes.
    #[error("decode error: {0}")]
    Decode(String),
    /// I/O error while reading a local texture.
    #[error("io error: {0}")]
    Io(String),
    /// Network error during download.
    #[error("network error: {0}")]
    Network(String),
    /// At least one texture of a preload batch failed.
    #[error("failed to preload {} of {total} textures", .failed.len())]
    PreloadFailed {
        /// Keys that failed, in request order.
        failed: Vec<TextureKey>,
        /// Size of the batch.
        total: usize,
    },
}
