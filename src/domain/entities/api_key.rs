//! Upstream API credential value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret credential for an external API, masked when displayed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey {
    value: String,
}

impl ApiKey {
    /// Creates a key, returning `None` for blank input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self { value })
    }

    /// Returns key as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked key for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.value.chars().count();
        if len <= 10 {
            return "*".repeat(len);
        }

        let visible_prefix: String = self.value.chars().take(4).collect();
        let visible_suffix: String = self.value.chars().skip(len - 4).collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_rejected() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new("   ").is_none());
    }

    #[test]
    fn test_masking() {
        let key = ApiKey::new("sk-abcdefghijklmnop").unwrap();
        assert_eq!(key.masked(), "sk-a...mnop");
        assert!(!format!("{key:?}").contains("efgh"));

        let short = ApiKey::new("short").unwrap();
        assert_eq!(short.to_string(), "*****");
    }

    #[test]
    fn test_masking_non_ascii_key() {
        let key = ApiKey::new("€€€€-secret-ünï").unwrap();
        assert_eq!(key.to_string(), "€€€€...-ünï");
        assert!(format!("{key:?}").contains("€€€€"));

        let short = ApiKey::new("ключ").unwrap();
        assert_eq!(short.masked(), "****");
    }
}
