//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations), so
//! the reducer never performs I/O or spawns tasks directly.

use cmms_core::auth::Credentials;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the authentication call for a submitted form.
    Authenticate { task: TaskId, credentials: Credentials },

    /// Fetch fresh dashboard data.
    RefreshDashboard { task: TaskId },
}
