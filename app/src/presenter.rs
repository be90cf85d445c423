//! Desktop notification presentation.
//!
//! The pipeline talks to a [`Notifier`] capability rather than the desktop
//! daemon directly, so tests can substitute a fake. [`DesktopNotifier`] is
//! the real one, backed by the freedesktop notification daemon.

use std::sync::atomic::{AtomicBool, Ordering};

use notify_rust::{Hint, Notification, Urgency};

use notif_payload::{DecodedNotification, UrgencyTier};

/// Capability interface for showing notifications. Each call produces
/// exactly one displayed notification; there is no dedup.
pub trait Notifier: Send + Sync {
    fn show(&self, notification: &DecodedNotification) -> anyhow::Result<()>;
}

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Presenter backed by the desktop notification daemon.
///
/// Must be initialized exactly once per process before the first `show`.
/// A second `init`, or a `show` without one, is a programming error and
/// panics so the defect is visible in development.
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn init() -> Self {
        assert!(
            !INITIALIZED.swap(true, Ordering::SeqCst),
            "DesktopNotifier initialized twice"
        );
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn show(&self, n: &DecodedNotification) -> anyhow::Result<()> {
        assert!(
            INITIALIZED.load(Ordering::SeqCst),
            "DesktopNotifier used before init"
        );

        let mut builder = Notification::new();
        builder
            .appname("mqtt2notif")
            .summary(&n.summary)
            .body(&n.body)
            .urgency(native_urgency(n.urgency));
        if let Some(path) = &n.icon {
            builder.icon(&path.to_string_lossy());
        }
        if let Some(hint) = n.category.as_ref().and_then(|c| c.xdg_hint()) {
            builder.hint(Hint::Category(hint.to_owned()));
        }
        builder.show()?;
        Ok(())
    }
}

fn native_urgency(tier: UrgencyTier) -> Urgency {
    match tier {
        UrgencyTier::Low => Urgency::Low,
        UrgencyTier::Normal => Urgency::Normal,
        UrgencyTier::Critical => Urgency::Critical,
    }
}
