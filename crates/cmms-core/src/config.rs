//! Configuration management.
//!
//! Loads configuration from ${CMMS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which authenticator backs the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Fixed-delay local comparison against the demo credentials.
    #[default]
    Demo,
    /// JSON POST to `endpoint`.
    Http,
}

/// Authentication configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,
    /// Login endpoint (http mode only).
    pub endpoint: String,
    /// Call timeout in seconds; `None` or 0 waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Simulated delay for demo mode.
    pub demo_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Demo,
            endpoint: "http://127.0.0.1:8000/api/login/".to_string(),
            timeout_secs: Some(10),
            demo_delay_ms: 2000,
        }
    }
}

/// Front-end timing and routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notification_secs: u64,
    pub redirect_delay_ms: u64,
    pub landing_target: String,
    pub metrics_refresh_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_secs: 5,
            redirect_delay_ms: 1500,
            landing_target: "/dashboard/".to_string(),
            metrics_refresh_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directives (e.g. "info" or "info,cmms_core=debug").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: AuthConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default template to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

pub mod paths {
    //! Path resolution for configuration and log directories.
    //!
    //! CMMS_HOME resolution order:
    //! 1. CMMS_HOME environment variable (if set)
    //! 2. ~/.config/cmms (default)
    //! 3. ./.cmms when no home directory can be determined

    use std::path::PathBuf;

    pub const HOME_ENV: &str = "CMMS_HOME";

    pub fn cmms_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV) {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".cmms"),
            |h| h.join(".config").join("cmms"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        cmms_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        cmms_home().join("logs")
    }
}
