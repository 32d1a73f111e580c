//! Collaborators the login controller drives.
//!
//! The controller only talks to these traits. `Toasts`, `FieldErrors` and
//! `Redirects` are the in-memory implementations the terminal front end
//! renders from; the headless CLI supplies console-printing ones.

mod fields;
mod redirect;
mod toast;

use std::time::Duration;

pub use fields::FieldErrors;
pub use redirect::{PendingRedirect, Redirects};
pub use toast::{Notification, Toasts};

use crate::validation::Field;

/// Severity of a page-level notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

/// Transient page-level message display.
///
/// Showing a message replaces whatever is visible; messages dismiss
/// themselves after a fixed delay.
pub trait NotificationSurface {
    fn show(&mut self, message: &str, kind: NotificationKind);
}

/// Inline per-field error slots.
pub trait FieldValidationDisplay {
    fn show_field_error(&mut self, field: Field, message: &str);
    fn clear_field_error(&mut self, field: Field);
}

/// Navigation to another destination after a delay.
pub trait Navigator {
    fn schedule(&mut self, target: &str, delay: Duration);

    /// Drops a scheduled navigation that has not happened yet.
    fn cancel(&mut self);
}
