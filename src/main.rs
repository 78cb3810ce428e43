//! Chefmate - Recipe browser and AI cooking assistant
//!
//! Main entry point for the Chefmate CLI.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chefmate::cli::{Cli, Commands};
use chefmate::commands;
use chefmate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { dish } => {
            if let Some(d) = &dish {
                tracing::debug!("Grounding chat in dish: {}", d);
            }
            commands::chat::run_chat(config, dish).await?;
            Ok(())
        }
        Commands::Video { url } => {
            commands::video::run_video(config, url).await?;
            Ok(())
        }
        Commands::List => {
            commands::browse::run_list(config)?;
            Ok(())
        }
        Commands::Show { name } => {
            commands::browse::run_show(config, name)?;
            Ok(())
        }
        Commands::Categories => {
            commands::browse::run_categories(config)?;
            Ok(())
        }
        Commands::Suggest { category } => {
            commands::browse::run_suggest(config, category)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "chefmate=debug" } else { "chefmate=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
