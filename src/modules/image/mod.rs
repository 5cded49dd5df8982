//! Screenshot ingest & normalize
//!
//! Pure transformation of user-supplied image bytes into the canonical
//! upload form: decode, constrain the longest dimension, drop alpha,
//! re-encode as JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;

/// Longest allowed output dimension in pixels. Oversized images are
/// shrunk to fit; smaller images are never enlarged.
pub const MAX_DIMENSION: u32 = 1280;

/// Fixed JPEG quality for normalized screenshots
pub const JPEG_QUALITY: u8 = 75;

/// Content type of every normalized screenshot
pub const CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to decode image: {0}")]
    Decode(image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(image::ImageError),
}

/// A screenshot ready for upload
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Normalize raw screenshot bytes for upload.
///
/// Steps: decode, shrink so neither dimension exceeds [`MAX_DIMENSION`]
/// (aspect preserved, shrink-only), convert to 3-channel RGB, encode as
/// JPEG at quality [`JPEG_QUALITY`]. Deterministic for identical input.
pub fn normalize(bytes: &[u8]) -> Result<NormalizedImage, ImageError> {
    let img = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let img = constrain(img);

    // Drops any alpha channel; JPEG has no transparency
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut data = Vec::with_capacity((width * height / 4) as usize);
    JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(ImageError::Encode)?;

    Ok(NormalizedImage {
        data,
        content_type: CONTENT_TYPE,
        width,
        height,
    })
}

/// Shrink the image so both dimensions fit within [`MAX_DIMENSION`].
/// No-op for images already within bounds.
fn constrain(img: DynamicImage) -> DynamicImage {
    if img.width() <= MAX_DIMENSION && img.height() <= MAX_DIMENSION {
        return img;
    }
    img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_oversized_landscape_is_constrained_with_aspect_preserved() {
        let out = normalize(&png_bytes(2000, 1000, [10, 20, 30, 255])).unwrap();
        assert_eq!((out.width, out.height), (1280, 640));
        assert_eq!(out.content_type, "image/jpeg");
    }

    #[test]
    fn test_oversized_portrait_is_constrained_with_aspect_preserved() {
        let out = normalize(&png_bytes(1000, 2000, [10, 20, 30, 255])).unwrap();
        assert_eq!((out.width, out.height), (640, 1280));
    }

    #[test]
    fn test_image_within_bounds_keeps_dimensions() {
        let out = normalize(&png_bytes(800, 600, [200, 100, 50, 255])).unwrap();
        assert_eq!((out.width, out.height), (800, 600));
    }

    #[test]
    fn test_exact_boundary_is_not_resized() {
        let out = normalize(&png_bytes(1280, 1280, [0, 0, 0, 255])).unwrap();
        assert_eq!((out.width, out.height), (1280, 1280));
    }

    #[test]
    fn test_alpha_channel_is_dropped() {
        let out = normalize(&png_bytes(64, 64, [255, 0, 0, 128])).unwrap();
        let decoded = image::load_from_memory(&out.data).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let input = png_bytes(1500, 900, [7, 77, 177, 255]);
        let first = normalize(&input).unwrap();
        let second = normalize(&input).unwrap();
        assert_eq!(first.data, second.data);
    }

    #[test]
    fn test_invalid_bytes_fail_with_decode_error() {
        let err = normalize(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }
}
