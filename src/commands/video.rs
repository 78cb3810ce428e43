//! Video recipe extraction handler
//!
//! Extracts a recipe from a YouTube video's captions, prints it, then
//! hands off to the chat loop grounded in the extracted recipe.

use crate::commands::chat::run_repl;
use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;
use crate::session::ChatSession;
use crate::video::{extract_recipe, TranscriptFetcher};
use colored::Colorize;

/// Runs the video extraction flow, then an interactive chat
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `url` - YouTube video URL
pub async fn run_video(config: Config, url: String) -> Result<()> {
    tracing::info!(url = %url, "Starting video recipe extraction");

    let provider = create_provider(&config.provider)?;
    let fetcher = TranscriptFetcher::new()?;

    println!("{}", "Fetching captions and extracting the recipe...".cyan());
    let context = match extract_recipe(&fetcher, provider.as_ref(), &url).await {
        Ok(context) => context,
        Err(e) => {
            // No context is created on failure; nothing to chat about.
            eprintln!("{}", format!("Could not extract a recipe: {}", e).red());
            return Ok(());
        }
    };

    println!("\n{}", "Extracted recipe:".bold());
    println!("{}\n", context.instructions);

    let mut session = ChatSession::new(provider, config.chat.greeting.clone());
    session.set_context(context);

    run_repl(&mut session, None).await
}
