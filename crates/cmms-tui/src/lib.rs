//! Full-screen terminal front end for the CMMS login page.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use cmms_core::config::Config;
pub use features::{dashboard, login, notification};
pub use runtime::TuiRuntime;

/// Runs the interactive login screen until the user quits.
pub async fn run(config: &Config) -> Result<()> {
    // The login screen requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The login screen requires a terminal.\n\
             Use `cmms login --username ... --password ...` for non-interactive sign-in."
        );
    }

    let authenticator = cmms_core::auth::from_config(&config.auth)?;
    tracing::info!(mode = ?config.auth.mode, "starting login screen");

    let mut runtime = TuiRuntime::new(config, authenticator)?;
    runtime.run()?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
