//! RoboDash - robot and task tracking dashboard
//!
//! CLI entry point.

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use robodash::cli::{Cli, Command};
use robodash::commands;
use robodash::config::Config;
use robotstore::{FileStorage, Persistence};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (WARN)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
                tracing::Level::WARN
            }
        },
        None => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("{}", e))?;

    debug!(?level, "Logging initialized");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(store_path) = cli.store_path {
        config.store_path = store_path;
    }
    info!(store_path = %config.store_path.display(), "robodash starting");

    let persistence = Persistence::new(FileStorage::new(&config.store_path));
    let mut store = persistence.open_store(config.store.clone());

    let mut stdout = std::io::stdout().lock();
    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Task { command } => commands::task(&mut store, command, &mut stdout)?,
        Command::Robot { command } => commands::robot(&mut store, command, &mut stdout)?,
        Command::Stats => commands::stats(&store, &mut stdout)?,
    }

    if persistence.failed_saves() > 0 {
        eprintln!(
            "Warning: changes could not be saved to {} (see log)",
            config.store_path.display()
        );
    }

    Ok(())
}
