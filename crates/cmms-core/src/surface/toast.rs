use std::time::{Duration, Instant};

use super::{NotificationKind, NotificationSurface};

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

/// Single-slot notification surface with auto-dismiss.
#[derive(Debug, Clone)]
pub struct Toasts {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl Toasts {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    /// Closes the visible notification immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drops the notification once its time is up. Returns true if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= self.ttl);
        if expired {
            self.current = None;
        }
        expired
    }

    pub(crate) fn show_at(&mut self, message: &str, kind: NotificationKind, now: Instant) {
        self.current = Some(Notification {
            message: message.to_string(),
            kind,
            shown_at: now,
        });
    }
}

impl NotificationSurface for Toasts {
    fn show(&mut self, message: &str, kind: NotificationKind) {
        tracing::debug!(kind = kind.label(), message, "notification");
        self.show_at(message, kind, Instant::now());
    }
}
