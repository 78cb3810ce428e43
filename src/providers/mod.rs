//! Provider module for Chefmate
//!
//! This module contains the completion-provider abstraction and the
//! Google Gemini implementation.

pub mod base;
pub mod gemini;

pub use base::{ChatTurn, ChunkStream, Provider, Role};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::{ChefmateError, Result};
use std::sync::Arc;

/// Creates a provider instance based on configuration
///
/// The returned provider is wrapped in an `Arc` so it can be shared
/// read-only across multiple chat sessions.
///
/// # Arguments
///
/// * `config` - Provider configuration
///
/// # Returns
///
/// Returns a shared provider instance
///
/// # Errors
///
/// Returns `MissingCredentials` when no API key is configured, or a
/// provider error for an unknown provider type.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Arc::new(gemini::GeminiProvider::new(&config.gemini)?)),
        other => Err(ChefmateError::Provider(format!(
            "Unknown provider type: {}",
            other
        ))
        .into()),
    }
}
