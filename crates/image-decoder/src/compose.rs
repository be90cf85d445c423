//! Icon-over-preview compositing.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::DecodeError;

/// Pixel size the icon is scaled to before overlaying.
const ICON_SIZE: u32 = 64;
/// Gap between the icon and the preview's bottom-right corner.
const MARGIN: u32 = 8;

/// Optional compositing capability: paints the app icon over the preview
/// image at a fixed corner.
///
/// Constructed once at startup when compositing is enabled; absence makes
/// the pipeline fall back to the plain icon.
#[derive(Debug, Default)]
pub struct Compositor;

impl Compositor {
    pub fn new() -> Self {
        Self
    }

    /// Build a single composite from encoded icon and preview bytes.
    ///
    /// The icon is resized to 64x64 and alpha-composited onto the preview
    /// at bottom-right with an 8px margin. Returns PNG bytes.
    pub fn compose(&self, icon: &[u8], preview: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let icon = image::load_from_memory(icon)?;
        let preview = image::load_from_memory(preview)?;

        let mut base = preview.to_rgba8();
        let icon = icon.resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3);
        let x = base.width().saturating_sub(ICON_SIZE + MARGIN);
        let y = base.height().saturating_sub(ICON_SIZE + MARGIN);
        overlay(&mut base, &icon, x, y);

        let mut out = Vec::new();
        DynamicImage::ImageRgba8(base)
            .write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)?;
        Ok(out)
    }
}

/// Alpha-composite `top` onto `base` at `(x, y)`, clipping at the edges.
fn overlay(base: &mut RgbaImage, top: &DynamicImage, x: u32, y: u32) {
    for (dx, dy, px) in top.to_rgba8().enumerate_pixels() {
        let (tx, ty) = (x + dx, y + dy);
        if tx >= base.width() || ty >= base.height() {
            continue;
        }
        let alpha = px[3] as f32 / 255.0;
        if alpha > 0.99 {
            base.put_pixel(tx, ty, *px);
        } else if alpha > 0.01 {
            let blended = blend(base.get_pixel(tx, ty), px, alpha);
            base.put_pixel(tx, ty, blended);
        }
    }
}

fn blend(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}
