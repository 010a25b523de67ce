//! Image normalization for the vision API envelope.
//!
//! The remote capability accepts one base64 JPEG bounded in both pixel
//! dimensions and encoded size. Anything larger fails locally, before a
//! network call is made.

use crate::error::{BoardcastError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use image::imageops::FilterType;

/// Downsize, RGB-normalize, JPEG-encode and base64 an image for the API.
///
/// Aspect ratio is preserved; the image is only shrunk, never enlarged.
///
/// # Errors
///
/// `PayloadTooLarge` if the encoded payload reaches `max_encoded_len`
/// characters; `Image` on encode failure.
pub fn encode_for_api(
    image: &DynamicImage,
    max_dim: u32,
    quality: u8,
    max_encoded_len: usize,
) -> Result<String> {
    let resized = if image.width() > max_dim || image.height() > max_dim {
        image.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        image.clone()
    };

    // JPEG has no alpha; normalize to RGB before encoding
    let rgb = resized.to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, quality);
    rgb.write_with_encoder(encoder)?;

    let encoded = STANDARD.encode(&jpeg);
    if encoded.len() >= max_encoded_len {
        return Err(BoardcastError::PayloadTooLarge {
            encoded_len: encoded.len(),
            limit: max_encoded_len,
        });
    }

    Ok(encoded)
}
