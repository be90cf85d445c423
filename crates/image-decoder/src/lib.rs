//! Image staging for desktop notifications.
//!
//! Decodes base64 image blobs into scratch files the notification daemon
//! can read, sniffing the format from content rather than trusting field
//! names, and optionally composites the app icon over a preview image.
//! Every failure here is recoverable: callers degrade to a plain icon or
//! to no image at all.

mod compose;
mod scratch;

pub use compose::Compositor;
pub use scratch::ScratchImage;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("scratch file write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode a base64 blob into raw bytes.
pub fn decode_base64(blob: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(BASE64.decode(blob.trim())?)
}
