//! Base types and traits for completion providers
//!
//! This module defines the core abstractions used by all completion
//! providers: conversation turns, the streaming chunk sequence, and the
//! `Provider` trait every backend implements.

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message from the user
    User,
    /// A message from the assistant
    Assistant,
}

/// One message in a conversation transcript
///
/// Turns are the unit of the transcript: an ordered, role-tagged
/// sequence of these is what gets rendered and what gets sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who produced this turn
    pub role: Role,
    /// The text content of the turn
    pub content: String,
}

impl ChatTurn {
    /// Creates a user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use chefmate::providers::{ChatTurn, Role};
    ///
    /// let turn = ChatTurn::user("How long do I boil the broth?");
    /// assert_eq!(turn.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A finite, non-restartable sequence of streamed text chunks
///
/// Produced by one completion request and consumed exactly once. The
/// stream ends when the service closes the response; an `Err` item
/// terminates it early.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Trait that all completion providers must implement
///
/// A provider carries no per-conversation state, so one instance can be
/// shared read-only across any number of chat sessions.
#[async_trait]
pub trait Provider: Send + Sync + std::fmt::Debug {
    /// Requests a streaming completion
    ///
    /// Sends the system instruction plus the full ordered transcript and
    /// returns a lazy chunk stream. The call suspends until the service
    /// responds (or fails); draining the stream yields the reply
    /// incrementally.
    ///
    /// # Arguments
    ///
    /// * `system_instruction` - The grounding instruction for this request
    /// * `turns` - The full transcript, in order
    ///
    /// # Errors
    ///
    /// Fails with `Authentication`, `QuotaExceeded`, `Transport`, or
    /// `MalformedResponse` depending on what the service reports.
    async fn stream_complete(
        &self,
        system_instruction: &str,
        turns: &[ChatTurn],
    ) -> Result<ChunkStream>;

    /// Requests a one-shot (non-streaming) completion
    ///
    /// Used for recipe extraction, where the full response is needed
    /// before anything can be shown.
    ///
    /// # Arguments
    ///
    /// * `system_instruction` - The task instruction
    /// * `content` - The single user payload (e.g. a raw transcript)
    async fn complete(&self, system_instruction: &str, content: &str) -> Result<String>;

    /// Gets the provider name for logging and diagnostics
    fn name(&self) -> &str;
}
