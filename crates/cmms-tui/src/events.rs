//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, the periodic tick, and
//! results of spawned tasks arriving through the inbox.

use cmms_core::auth::AuthOutcome;
use crossterm::event::Event;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer heartbeat; drives toast expiry, redirects and metric updates.
    Tick,

    /// Raw terminal event (key, paste, resize).
    Terminal(Event),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Wraps the task's own result event; dropped unless the task is active.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// The authentication call settled (a panic arrives as `Err`).
    AuthSettled {
        result: anyhow::Result<AuthOutcome>,
    },

    /// The simulated dashboard data fetch finished.
    DashboardRefreshed,
}
