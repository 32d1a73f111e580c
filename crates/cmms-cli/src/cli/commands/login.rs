//! Headless sign-in through the same controller the login screen uses.

use std::time::Duration;

use anyhow::{Result, anyhow};
use cmms_core::auth;
use cmms_core::config::{self, Config};
use cmms_core::logging::{self, Echo};
use cmms_core::login::{AttemptState, LoginFormController, LoginSettings};
use cmms_core::surface::{FieldErrors, Navigator, NotificationKind, NotificationSurface};
use tracing::info;

/// Prints notifications as `[kind] message` lines.
struct ConsoleNotices;

impl NotificationSurface for ConsoleNotices {
    fn show(&mut self, message: &str, kind: NotificationKind) {
        println!("[{}] {message}", kind.label());
    }
}

/// Reports the redirect instead of waiting for it.
struct ConsoleRedirect;

impl Navigator for ConsoleRedirect {
    fn schedule(&mut self, target: &str, _delay: Duration) {
        println!("Redirect: {target}");
    }

    fn cancel(&mut self) {}
}

pub async fn run(config: &Config, username: &str, password: &str, verbose: bool) -> Result<()> {
    let echo = if verbose { Echo::Stderr } else { Echo::None };
    let _guard = logging::init(&config.logging, &config::paths::logs_dir(), echo)?;

    let authenticator = auth::from_config(&config.auth)?;
    let mut form = LoginFormController::new(
        ConsoleNotices,
        FieldErrors::default(),
        ConsoleRedirect,
        authenticator,
        LoginSettings::from(&config.ui),
    );

    info!(mode = ?config.auth.mode, "headless login");

    match form.submit(username, password).await {
        AttemptState::Succeeded => Ok(()),
        state => {
            info!(?state, "headless login did not succeed");
            let error = form
                .last_error()
                .map_or_else(|| anyhow!("no result"), anyhow::Error::from);
            Err(error.context("Login failed"))
        }
    }
}
