//! JobAgent CLI - session-aware client for the JobAgent API

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "jobagent")]
#[command(about = "Talk to the JobAgent API with a persisted session")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long, global = true, env = "JOBAGENT_CONFIG")]
    config: Option<PathBuf>,

    /// API origin, overriding the configured one
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Session file, overriding the configured one
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into(), cli.log_file.as_deref())?;

    let config = config::load(cli.config.as_deref(), cli.origin, cli.token_file)?;
    debug!(origin = %config.origin, "Loaded configuration");

    if let Err(e) = cli.command.execute(&config).await {
        error!("Command failed: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
