use anyhow::Result;
use clap::Parser;

use gangway::{
    app::load_config,
    cli::{run, Cli, Commands},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging if verbose
    if cli.verbose {
        init_logger();
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        let toml_str = std::fs::read_to_string(config_path)?;
        toml::from_str(&toml_str)?
    } else {
        load_config().unwrap_or_default()
    };

    if !config.color {
        colored::control::set_override(false);
    }

    // Status is the default when no subcommand is given
    let command = cli.command.unwrap_or(Commands::Status);
    run(config, command).await
}
