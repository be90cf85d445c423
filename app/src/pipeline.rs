//! The message pipeline: normalize, stage images, present.

use std::path::PathBuf;

use image_decoder::{Compositor, ScratchImage};
use notif_payload::Payload;

use crate::presenter::Notifier;

/// Context for the subscribe callback chain: the presenter capability, the
/// optional compositing capability (checked once at startup, never
/// re-probed), and the scratch directory for staged images.
pub struct Bridge {
    notifier: Box<dyn Notifier>,
    compositor: Option<Compositor>,
    scratch_dir: PathBuf,
}

impl Bridge {
    pub fn new(
        notifier: Box<dyn Notifier>,
        compositor: Option<Compositor>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            notifier,
            compositor,
            scratch_dir,
        }
    }

    /// Process one raw broker message.
    ///
    /// Never propagates an error: malformed payloads are logged and
    /// dropped, image failures degrade to a plain or missing icon, and a
    /// presentation failure is logged. The next message is unaffected.
    pub fn handle_message(&self, raw: &[u8]) {
        let payload = match Payload::parse(raw) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed message");
                return;
            }
        };
        let mut notification = match payload.normalize() {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding message");
                return;
            }
        };

        tracing::debug!(
            summary = %notification.summary,
            urgency = ?notification.urgency,
            package = payload.package.as_deref().unwrap_or("unknown"),
            posted_at = %format_timestamp(payload.timestamp),
            "Notification received"
        );

        let scratch = self.stage_image(&payload);
        if let Some(image) = &scratch {
            notification.icon = Some(image.path().to_path_buf());
        }
        if let Err(e) = self.notifier.show(&notification) {
            tracing::error!(error = %e, "Failed to show notification");
        }
        // `scratch` drops here: the staged file is removed exactly once
        // after presentation returns, success or failure.
    }

    /// Decode whatever images the payload carries and stage the best one.
    ///
    /// Icon and preview decode independently, each failure degrading to
    /// absence. With both present and the compositor available, the icon
    /// is overlaid on the preview; a compositing failure falls back to the
    /// plain icon.
    fn stage_image(&self, payload: &Payload) -> Option<ScratchImage> {
        let icon = payload.icon.as_deref().and_then(|b| decode_field(b, "icon"));
        let preview = payload
            .preview_image
            .as_deref()
            .and_then(|b| decode_field(b, "previewImage"));

        let bytes = match (icon, preview) {
            (Some(icon), Some(preview)) => match &self.compositor {
                Some(compositor) => match compositor.compose(&icon, &preview) {
                    Ok(composite) => composite,
                    Err(e) => {
                        tracing::warn!(error = %e, "Compositing failed, using plain icon");
                        icon
                    }
                },
                None => icon,
            },
            (Some(icon), None) => icon,
            (None, Some(preview)) => preview,
            (None, None) => return None,
        };

        match ScratchImage::write(&bytes, &self.scratch_dir) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(error = %e, "Could not stage notification image");
                None
            }
        }
    }
}

fn decode_field(blob: &str, field: &'static str) -> Option<Vec<u8>> {
    match image_decoder::decode_base64(blob) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(field, error = %e, "Ignoring undecodable image");
            None
        }
    }
}

fn format_timestamp(epoch_ms: Option<i64>) -> String {
    epoch_ms
        .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}
