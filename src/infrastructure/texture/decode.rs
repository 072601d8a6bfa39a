//! Image decoding shared by every texture source.

use bytes::Bytes;
use image::imageops::FilterType;

use crate::domain::errors::{TextureError, TextureResult};

/// Decodes `bytes` on the blocking pool, downsizing images wider than `max_width`.
pub(super) async fn decode_texture(
    bytes: Bytes,
    max_width: u32,
) -> TextureResult<image::DynamicImage> {
    tokio::task::spawn_blocking(move || decode_blocking(&bytes, max_width))
        .await
        .map_err(|e| TextureError::Decode(format!("decode task panicked: {e}")))?
}

fn decode_blocking(bytes: &[u8], max_width: u32) -> TextureResult<image::DynamicImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| TextureError::Decode(format!("failed to decode image: {e}")))?;

    if max_width > 0 && img.width() > max_width {
        Ok(img.resize(max_width, u32::MAX, FilterType::Triangle))
    } else {
        Ok(img)
    }
}

#[cfg(test)]
pub(super) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::new_rgba8(width, height)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decode_png() {
        let img = decode_texture(Bytes::from(png_bytes(8, 4)), 1024).await.unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[tokio::test]
    async fn test_wide_images_are_downsized() {
        let img = decode_texture(Bytes::from(png_bytes(64, 32)), 16).await.unwrap();
        assert_eq!((img.width(), img.height()), (16, 8));
    }

    #[tokio::test]
    async fn test_garbage_is_decode_error() {
        let result = decode_texture(Bytes::from_static(b"not an image"), 1024).await;
        assert!(matches!(result, Err(TextureError::Decode(_))));
    }
}
