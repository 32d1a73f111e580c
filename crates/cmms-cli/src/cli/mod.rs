//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use cmms_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "cmms")]
#[command(version)]
#[command(about = "CMMS maintenance platform sign-in")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in without the interactive screen
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long, env = "CMMS_PASSWORD", hide_env_values = true)]
        password: String,

        /// Also print logs to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    // default to the login screen
    let Some(command) = cli.command else {
        let config = config::Config::load().context("load config")?;
        return commands::app::run(&config).await;
    };

    match command {
        Commands::Login {
            username,
            password,
            verbose,
        } => {
            let config = config::Config::load().context("load config")?;
            commands::login::run(&config, &username, &password, verbose).await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
