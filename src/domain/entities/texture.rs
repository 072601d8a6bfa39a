//! Domain types for texture handling.

use std::borrow::Borrow;
use std::sync::Arc;

/// Decoded texture shared between the cache and its consumers.
pub type Texture = Arc<image::DynamicImage>;

/// Resource locator identifying a texture (a URL or a path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureKey(String);

impl TextureKey {
    /// Creates a new `TextureKey` from any string-like input.
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Returns the inner locator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the locator points at a remote resource.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl std::fmt::Display for TextureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for TextureKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TextureKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TextureKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&TextureKey> for TextureKey {
    fn from(key: &TextureKey) -> Self {
        key.clone()
    }
}
