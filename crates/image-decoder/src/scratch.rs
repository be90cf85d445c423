//! Scratch files holding decoded images for the notification daemon.

use std::fs;
use std::path::{Path, PathBuf};

use nanoid::nanoid;

use crate::DecodeError;

/// A decoded image staged on disk for one in-flight notification.
///
/// The file lives until the handle drops, so the caller decides the
/// deletion point by scoping the handle around the presentation call. The
/// file is removed exactly once, whatever the presentation outcome.
#[derive(Debug)]
pub struct ScratchImage {
    path: PathBuf,
}

impl ScratchImage {
    /// Write image bytes to a uniquely-named file under `dir`.
    ///
    /// The extension comes from sniffing the bytes, not from any wire
    /// field; unrecognizable data is rejected.
    pub fn write(bytes: &[u8], dir: &Path) -> Result<Self, DecodeError> {
        let format = image::guess_format(bytes)?;
        let ext = format.extensions_str().first().copied().unwrap_or("img");
        let path = dir.join(format!("mqtt2notif-{}.{ext}", nanoid!()));
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Staged notification image");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchImage {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Could not remove scratch image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn write_names_file_by_sniffed_format() {
        let img = ScratchImage::write(&png_bytes(), &std::env::temp_dir()).unwrap();
        assert!(img.path().exists());
        assert_eq!(img.path().extension().unwrap(), "png");
    }

    #[test]
    fn drop_removes_file() {
        let img = ScratchImage::write(&png_bytes(), &std::env::temp_dir()).unwrap();
        let path = img.path().to_path_buf();
        drop(img);
        assert!(!path.exists());
    }

    #[test]
    fn write_rejects_unrecognizable_bytes() {
        assert!(matches!(
            ScratchImage::write(b"definitely not an image", &std::env::temp_dir()),
            Err(DecodeError::Image(_))
        ));
    }
}
