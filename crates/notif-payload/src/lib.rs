//! Wire payload parsing and normalization for incoming notifications.
//!
//! Messages arrive on the broker topic as UTF-8 JSON. Everything except
//! title/text is optional, and a malformed or empty message must never
//! take down the pipeline: parse and normalize errors are returned to the
//! caller, which logs and moves on to the next message.

mod category;
mod urgency;

pub use category::Category;
pub use urgency::UrgencyTier;

use std::path::PathBuf;

use serde::Deserialize;

/// Raw notification payload as published on the broker topic.
///
/// Field names match the wire format; `previewImage` is the only
/// camelCase key. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Payload {
    /// Source application id (e.g. `com.example.mail`).
    pub package: Option<String>,
    /// Human-readable source application name.
    pub app: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    /// Epoch milliseconds at which the notification was posted.
    pub timestamp: Option<i64>,
    /// Base64-encoded app icon.
    pub icon: Option<String>,
    /// Base64-encoded preview image (e.g. an attached photo).
    #[serde(rename = "previewImage")]
    pub preview_image: Option<String>,
    /// Importance level 0-5.
    pub importance: Option<i64>,
    pub urgency: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload carries neither title nor text")]
    Empty,
}

/// Normalized notification, ready for presentation.
///
/// Created per incoming message and consumed immediately; never persisted.
/// The icon path is filled in by the image staging step, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedNotification {
    pub summary: String,
    pub body: String,
    pub urgency: UrgencyTier,
    pub category: Option<Category>,
    pub icon: Option<PathBuf>,
}

impl Payload {
    pub fn parse(raw: &[u8]) -> Result<Self, PayloadError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Validate and normalize into a [`DecodedNotification`].
    ///
    /// A payload missing both `title` and `text` (absent or empty) is
    /// rejected. With only `text`, the summary falls back to the app name,
    /// or to the literal `"Notification"` when that is missing too.
    pub fn normalize(&self) -> Result<DecodedNotification, PayloadError> {
        let title = self.title.as_deref().filter(|s| !s.is_empty());
        let text = self.text.as_deref().filter(|s| !s.is_empty());
        if title.is_none() && text.is_none() {
            return Err(PayloadError::Empty);
        }

        let app = self.app.as_deref().filter(|s| !s.is_empty());
        let summary = match (app, title) {
            (Some(app), Some(title)) => format!("{app}: {title}"),
            (None, Some(title)) => title.to_owned(),
            (Some(app), None) => app.to_owned(),
            (None, None) => "Notification".to_owned(),
        };

        Ok(DecodedNotification {
            summary,
            body: text.unwrap_or_default().to_owned(),
            urgency: UrgencyTier::resolve(self.urgency.as_deref(), self.importance),
            category: self
                .category
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(Category::from_wire),
            icon: None,
        })
    }
}
