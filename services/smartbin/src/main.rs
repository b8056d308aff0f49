//! Smartbin CLI
//!
//! Command-line interface for the waste-bin monitoring and dispatch service.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use smartbin::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "smartbin")]
#[command(about = "Waste-bin monitoring and dispatch service")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API port (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[derive(Subcommand)]
enum Command {
    /// Prompt for a password and print its Argon2 hash for `auth.password_hash`
    HashPassword,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    if let Some(Command::HashPassword) = args.command {
        let password = rpassword::prompt_password("Password: ")?;
        println!("{}", sw_auth::hash_password(&password)?);
        return Ok(());
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, port={:?}, log_level={:?}",
        args.config,
        args.port,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Starting smartbin service");
    tracing::debug!(
        "Source: {}, Teams: {}, Alert threshold: {}",
        config.source.type_name(),
        config.teams.len(),
        config.alerts.threshold
    );

    smartbin::run(config).await?;

    Ok(())
}
