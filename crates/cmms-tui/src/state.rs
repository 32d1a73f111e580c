//! Application state composition.
//!
//! ```text
//! AppState
//! ├── screen: Screen            (which page is showing)
//! ├── login: LoginState         (controller + control focus)
//! ├── dashboard: DashboardState (metrics, refresh timers)
//! ├── task_seq: TaskSeq         (async task id generator)
//! └── tasks: Tasks              (task lifecycle state)
//! ```
//!
//! The toast surface is owned by the login controller; the dashboard
//! shows its notifications through the same surface.

use std::sync::Arc;
use std::time::Duration;

use cmms_core::auth::Authenticator;
use cmms_core::config::Config;
use cmms_core::login::{LoginFormController, LoginSettings};
use cmms_core::surface::{FieldErrors, Redirects, Toasts};

use crate::common::{TaskSeq, Tasks};
use crate::dashboard::DashboardState;
use crate::login::LoginState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Dashboard,
}

pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub dashboard: DashboardState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config, authenticator: Arc<dyn Authenticator>) -> Self {
        let ui = &config.ui;
        let form = LoginFormController::new(
            Toasts::new(Duration::from_secs(ui.notification_secs)),
            FieldErrors::default(),
            Redirects::default(),
            authenticator,
            LoginSettings::from(ui),
        );
        Self {
            screen: Screen::Login,
            login: LoginState::new(form),
            dashboard: DashboardState::new(Duration::from_secs(ui.metrics_refresh_secs)),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn toasts(&self) -> &Toasts {
        self.login.form.notifications()
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        self.login.form.notifications_mut()
    }
}
