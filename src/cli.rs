//! Command-line interface definition for Chefmate
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for browsing the recipe dataset and chatting
//! with the AI chef.

use clap::{Parser, Subcommand};

/// Chefmate - Recipe browser and AI cooking assistant
///
/// Browse a dataset of dishes and chat with an AI chef grounded in a
/// selected recipe or a recipe extracted from a YouTube video.
#[derive(Parser, Debug, Clone)]
#[command(name = "chefmate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the completion model from config
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override the recipe dataset path from config
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Chefmate
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat with the AI chef
    Chat {
        /// Ground the conversation in this dish from the dataset
        #[arg(long)]
        dish: Option<String>,
    },

    /// Extract a recipe from a YouTube video, then chat about it
    Video {
        /// YouTube video URL (youtu.be/<id> or youtube.com/watch?v=<id>)
        url: String,
    },

    /// List all dish names in the dataset
    List,

    /// Show the ingredients and instructions for one dish
    Show {
        /// Dish name (case-insensitive)
        name: String,
    },

    /// Show how many dishes fall in each ingredient category
    Categories,

    /// Suggest a random dish from a category
    Suggest {
        /// Category name (Pork, Beef, Prawn, Chicken, Fish, Other)
        category: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            model: None,
            dataset: None,
            verbose: false,
            command: Commands::List,
        }
    }
}
