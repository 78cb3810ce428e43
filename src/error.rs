//! Error types for Chefmate
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Chefmate operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, dataset access, completion requests, and
/// video transcript extraction.
#[derive(Error, Debug)]
pub enum ChefmateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion provider errors (API calls, malformed payloads, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Network/transport failures while a completion is streaming
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be parsed into the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Authentication errors (e.g., 401 Unauthorized)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Request quota exhausted (e.g., 429 Too Many Requests)
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// A completion is already in flight for this conversation
    #[error("A completion is already in progress for this conversation")]
    CompletionInProgress,

    /// Recipe dataset errors (load failures, query errors)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// The given URL is not a recognizable YouTube video URL
    #[error("Invalid video URL: {0}")]
    InvalidVideoUrl(String),

    /// The video has no usable caption track
    #[error("No captions available for video: {0}")]
    NoCaptions(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Embedded database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for Chefmate operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
