//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use siga_core::auth::{AuthGateway, RosterGateway};
use siga_core::config::{Config, paths};

#[derive(Parser)]
#[command(name = "siga")]
#[command(version)]
#[command(about = "Terminal shell for the SIGA student information system")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to an alternative config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Check credentials against the identity provider and print the identity
    Verify {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        None => {
            // The shell owns the screen, so logs go to a file.
            let _guard = crate::logging::init()?;
            tracing::info!("starting shell");
            async_runtime()?.block_on(siga_tui::run_shell(&config))
        }
        Some(Commands::Verify { username, password }) => {
            async_runtime()?.block_on(verify(&config, &username, &password))
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                println!("{}", paths::config_path().display());
                Ok(())
            }
            ConfigCommands::Show => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
        },
    }
}

fn async_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}

/// One-shot credential check: prints the resulting identity as JSON.
async fn verify(config: &Config, username: &str, password: &str) -> Result<()> {
    let gateway = RosterGateway::new(config.accounts.clone());
    let identity = gateway
        .authenticate(username, password)
        .await
        .context("Authentication failed")?;
    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}
