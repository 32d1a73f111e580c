//! Tracing setup.
//!
//! Logs go to a daily-rolling file under the logs directory because the
//! terminal UI owns stdout. Headless commands can mirror them to stderr.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Environment variable holding filter directives; overrides the config level.
pub const LOG_ENV: &str = "CMMS_LOG";

const LOG_FILE_PREFIX: &str = "cmms.log";

/// Where log output goes besides the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    None,
    Stderr,
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| config.level.clone());
    // Keep HTTP internals quiet unless asked for explicitly.
    let directives = format!("{directives},hyper=warn,reqwest=warn");
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow!("Invalid tracing filter '{directives}': {e}"))
}

/// Installs the global subscriber.
///
/// The returned guard flushes the non-blocking writer on drop and must be
/// held for the life of the process.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a subscriber is already installed.
pub fn init(config: &LoggingConfig, logs_dir: &Path, echo: Echo) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = (echo == Echo::Stderr).then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(build_env_filter(config)?)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_level_builds_filter() {
        let config = LoggingConfig {
            level: "debug,cmms_core=trace".to_string(),
        };
        assert!(build_env_filter(&config).is_ok());
    }
}
