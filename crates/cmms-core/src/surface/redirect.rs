use std::time::{Duration, Instant};

use super::Navigator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRedirect {
    pub target: String,
    pub due: Instant,
}

/// Holds at most one scheduled redirect until its deadline passes.
#[derive(Debug, Clone, Default)]
pub struct Redirects {
    pending: Option<PendingRedirect>,
}

impl Redirects {
    pub fn pending(&self) -> Option<&PendingRedirect> {
        self.pending.as_ref()
    }

    /// Returns the target once it is due, consuming the redirect.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.pending.take().map(|p| p.target)
        } else {
            None
        }
    }
}

impl Navigator for Redirects {
    fn schedule(&mut self, target: &str, delay: Duration) {
        tracing::debug!(target, ?delay, "redirect scheduled");
        self.pending = Some(PendingRedirect {
            target: target.to_string(),
            due: Instant::now() + delay,
        });
    }

    fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("redirect cancelled");
        }
    }
}
