//! Network texture source.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::TextureKey;
use crate::domain::errors::{TextureError, TextureResult};
use crate::domain::ports::TextureSourcePort;

use super::TextureSourceConfig;
use super::decode::decode_texture;

/// Downloads textures over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTextureSource {
    http_client: reqwest::Client,
    max_width: u32,
}

impl HttpTextureSource {
    /// Creates a new source.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &TextureSourceConfig) -> TextureResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TextureError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            max_width: config.max_width,
        })
    }

    async fn download(&self, url: &str) -> TextureResult<bytes::Bytes> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| TextureError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(TextureError::Network(format!(
                "HTTP {}: {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| TextureError::Network(format!("Failed to read body: {e}")))
    }
}

#[async_trait]
impl TextureSourcePort for HttpTextureSource {
    async fn fetch(&self, key: &TextureKey) -> TextureResult<image::DynamicImage> {
        if !key.is_remote() {
            return Err(TextureError::InvalidLocator(format!(
                "not an http(s) URL: {key}"
            )));
        }

        debug!(key = %key, "Downloading texture");
        let bytes = self.download(key.as_str()).await?;
        decode_texture(bytes, self.max_width).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::texture::decode::png_bytes;

    fn source() -> HttpTextureSource {
        HttpTextureSource::new(&TextureSourceConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_download() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/orb.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(png_bytes(6, 6))
            .create_async()
            .await;

        let key = TextureKey::new(format!("{}/orb.png", server.url()));
        let img = source().fetch(&key).await.unwrap();

        assert_eq!(img.width(), 6);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.png")
            .with_status(404)
            .create_async()
            .await;

        let key = TextureKey::new(format!("{}/missing.png", server.url()));
        let result = source().fetch(&key).await;

        assert_eq!(
            result.unwrap_err(),
            TextureError::Network("HTTP 404: Not Found".to_string())
        );
    }

    #[tokio::test]
    async fn test_rejects_non_http_locator() {
        let result = source().fetch(&TextureKey::new("textures/orb.png")).await;
        assert!(matches!(result, Err(TextureError::InvalidLocator(_))));
    }
}
