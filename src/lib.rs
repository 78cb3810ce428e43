//! Chefmate - Recipe browser and AI cooking assistant library
//!
//! This library provides the core functionality for Chefmate: the recipe
//! dataset, the grounding-prompt builder, the streaming chat session
//! protocol, and the Gemini completion provider.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: The chat session protocol (transcript, submit/stream/commit)
//! - `providers`: Completion provider abstraction and the Gemini implementation
//! - `dataset`: CSV-backed recipe dataset with in-memory SQL queries
//! - `recipe`: The grounding context value type
//! - `prompts`: System instruction builders
//! - `video`: YouTube caption fetch and recipe extraction
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chefmate::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     // Session usage would go here
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod recipe;
pub mod session;
pub mod video;

// Re-export commonly used types
pub use config::Config;
pub use dataset::{Dataset, DishRecord};
pub use error::{ChefmateError, Result};
pub use recipe::RecipeContext;
pub use session::{ChatSession, SubmitOutcome, Transcript};
