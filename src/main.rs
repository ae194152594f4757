//! pagescript - natural-language page scripting.
//!
//! Main entry point: loads configuration, installs logging and dispatches
//! the CLI command. `serve` (the default) speaks JSON lines on stdio.

mod cli;
mod commands;
mod register;
mod server;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use pagescript_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ConfigLoader::default_path);
    let config = ConfigLoader::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    server::init_tracing(&config.logging)?;

    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    info!("pagescript v{} (config: {})", env!("CARGO_PKG_VERSION"), config_path.display());

    let service = register::build_service(&config).await?;

    commands::run(&service, cli.command.unwrap_or(Commands::Serve)).await
}
