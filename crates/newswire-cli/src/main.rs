//! Newswire CLI - Command-line interface for the Newswire catalog
//!
//! Provides commands for:
//! - Pulling remote catalog changes (one-shot or periodic)
//! - Browsing topics, authors, and news resources
//! - Following interests and bookmarking resources
//! - Viewing sync status and configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod output;

use commands::{
    authors::AuthorsCommand, config::ConfigCommand, news::NewsCommand, status::StatusCommand,
    sync::SyncCommand, topics::TopicsCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "newswire", version, about = "Offline-first news catalog client")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pull remote catalog changes into the local store
    Sync(SyncCommand),
    /// Show sync cursors and catalog counts
    Status(StatusCommand),
    /// Browse and follow topics
    #[command(subcommand)]
    Topics(TopicsCommand),
    /// Browse and follow authors
    #[command(subcommand)]
    Authors(AuthorsCommand),
    /// Browse, bookmark, and mark news resources
    #[command(subcommand)]
    News(NewsCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(config, format).await,
        Commands::Status(cmd) => cmd.execute(config, format).await,
        Commands::Topics(cmd) => cmd.execute(config, format).await,
        Commands::Authors(cmd) => cmd.execute(config, format).await,
        Commands::News(cmd) => cmd.execute(config, format).await,
        Commands::Config(cmd) => cmd.execute(config, format).await,
    }
}
