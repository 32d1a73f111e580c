//! Interactive login screen.

use anyhow::Result;
use cmms_core::config::{self, Config};
use cmms_core::logging::{self, Echo};

pub async fn run(config: &Config) -> Result<()> {
    // The TUI owns the terminal; logs go to the file only.
    let _guard = logging::init(&config.logging, &config::paths::logs_dir(), Echo::None)?;
    cmms_tui::run(config).await
}
