//! Attempt and presentation state owned by the login controller.

use std::fmt;
use std::time::Instant;

/// Lifecycle of one login attempt.
///
/// ```text
/// Idle -> Validating -> Idle        (a field is invalid)
///                    -> Submitting -> Succeeded | Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl AttemptState {
    pub fn is_submitting(self) -> bool {
        matches!(self, AttemptState::Submitting)
    }

    /// `Succeeded` and `Failed` end an attempt; the next submit starts fresh.
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptState::Succeeded | AttemptState::Failed)
    }
}

/// One submit-to-result cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub username: String,
    pub password: String,
    pub state: AttemptState,
}

impl fmt::Debug for LoginAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginAttempt")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("state", &self.state)
            .finish()
    }
}

/// Password field rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordVisibility {
    #[default]
    Masked,
    Plain,
}

impl PasswordVisibility {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            PasswordVisibility::Masked => PasswordVisibility::Plain,
            PasswordVisibility::Plain => PasswordVisibility::Masked,
        }
    }

    pub fn is_masked(self) -> bool {
        matches!(self, PasswordVisibility::Masked)
    }

    /// Icon shown on the toggle: an eye while masked, a struck eye while plain.
    pub fn icon(self) -> &'static str {
        match self {
            PasswordVisibility::Masked => "eye",
            PasswordVisibility::Plain => "eye-slash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

/// Form-level message slot (above the submit control).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
    pub shown_at: Instant,
}
