//! Config command - inspect and initialize configuration

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use newswire_core::config::Config;

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the config file path in effect
    Path,
    /// Write a default config file if none exists
    Init,
}

impl ConfigCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let path = App::config_path(config);

        match self {
            ConfigCommand::Show => {
                let loaded = Config::load(&path)?;
                match format {
                    OutputFormat::Json => {
                        formatter.print_json(&serde_json::to_value(&loaded)?);
                    }
                    OutputFormat::Human => {
                        print!("{}", serde_yaml::to_string(&loaded)?);
                    }
                }
            }
            ConfigCommand::Path => {
                println!("{}", path.display());
            }
            ConfigCommand::Init => {
                if path.exists() {
                    formatter.error(&format!("Config already exists at {}", path.display()));
                    std::process::exit(1);
                }
                Config::default().save(&path)?;
                formatter.success(&format!("Wrote default config to {}", path.display()));
            }
        }

        Ok(())
    }
}
