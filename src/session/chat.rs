//! Streaming completion session
//!
//! The core protocol of the application: one `ChatSession` owns one
//! transcript and one active recipe context, and orchestrates each
//! request/response cycle against the completion provider. A submission
//! either commits (user turn plus one assistant turn appended) or rolls
//! back (transcript byte-for-byte unchanged); it is never left with a
//! dangling, un-answered user turn.

use crate::error::{ChefmateError, Result};
use crate::prompts::build_system_instruction;
use crate::providers::{ChatTurn, Provider};
use crate::recipe::{ContextSource, RecipeContext};
use crate::session::transcript::Transcript;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text was empty after trimming; nothing happened and no
    /// network call was made
    Ignored,
    /// The reply streamed to completion and was committed as one
    /// assistant turn; carries the full accumulated reply
    Committed(String),
    /// The completion failed before committing; the pending user turn
    /// was rolled back and this carries the error description
    RolledBack(String),
}

/// One conversational session: a transcript plus its grounding context
///
/// The UI layer holds one session per chat surface and never reaches
/// into another's state. The provider handle is shared read-only; it
/// carries no per-conversation state.
pub struct ChatSession {
    provider: Arc<dyn Provider>,
    transcript: Transcript,
    context: RecipeContext,
    default_greeting: String,
    streaming: bool,
    last_error: Option<String>,
}

impl ChatSession {
    /// Creates a session with the empty sentinel context and a
    /// transcript seeded with the given greeting
    pub fn new(provider: Arc<dyn Provider>, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            provider,
            transcript: Transcript::with_greeting(greeting.clone()),
            context: RecipeContext::empty(),
            default_greeting: greeting,
            streaming: false,
            last_error: None,
        }
    }

    /// Replaces the active grounding context
    ///
    /// When the context identity actually changes (a different dish or
    /// video), the transcript is reset to a single greeting turn for the
    /// new context. Re-selecting the identical dish or video leaves the
    /// conversation intact.
    pub fn set_context(&mut self, context: RecipeContext) {
        if context.source == self.context.source {
            self.context = context;
            return;
        }

        let greeting = self.greeting_for(&context);
        info!(name = %context.name, "Switching grounding context");
        self.transcript.reset(greeting);
        self.context = context;
    }

    fn greeting_for(&self, context: &RecipeContext) -> String {
        match &context.source {
            ContextSource::Dish(name) => format!(
                "I see you are interested in **{}**. How can I help you with this dish?",
                name
            ),
            ContextSource::Video(_) => {
                "I've analyzed the video! Ask me anything about this recipe.".to_string()
            }
            ContextSource::None => self.default_greeting.clone(),
        }
    }

    /// Submits user text and drains the streamed reply
    ///
    /// Implements the full submission protocol:
    /// 1. Whitespace-only text is silently ignored; no state change, no
    ///    network call.
    /// 2. The user turn is appended to the transcript before dispatch,
    ///    so it is visible even if the call that follows fails.
    /// 3. The outbound request carries the full transcript plus a system
    ///    instruction built from the live context at send time.
    /// 4. Chunks are surfaced to `on_chunk` in arrival order and
    ///    concatenated into the reply accumulator.
    /// 5. On stream completion the accumulator is committed as one
    ///    assistant turn; on any failure before that, the pending user
    ///    turn is rolled back synchronously and partial output is
    ///    discarded.
    ///
    /// # Arguments
    ///
    /// * `text` - The user's message
    /// * `on_chunk` - Called once per received chunk, for progressive
    ///   rendering
    ///
    /// # Errors
    ///
    /// Returns `CompletionInProgress` if an earlier submission on this
    /// session was abandoned mid-stream (its future dropped before
    /// resolving). Live submissions are already serialized by the
    /// exclusive borrow; the flag catches the abandoned case, where
    /// accepting new text could interleave with the discarded stream's
    /// accumulation. Completion failures do not surface as `Err`; they
    /// resolve to `SubmitOutcome::RolledBack`.
    pub async fn submit<F>(&mut self, text: &str, mut on_chunk: F) -> Result<SubmitOutcome>
    where
        F: FnMut(&str),
    {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring empty submission");
            return Ok(SubmitOutcome::Ignored);
        }

        if self.streaming {
            return Err(ChefmateError::CompletionInProgress.into());
        }

        // The user's own turn is visible before any assistant output,
        // even if the network call fails.
        self.transcript.append_user(trimmed);

        // Rebuilt from the live context on every submission.
        let instruction = build_system_instruction(&self.context);

        // In flight from dispatch until commit or rollback; stays set if
        // this future is dropped mid-stream.
        self.streaming = true;

        debug!(turns = self.transcript.len(), "Dispatching completion request");
        let stream = match self
            .provider
            .stream_complete(&instruction, self.transcript.turns())
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                self.streaming = false;
                return Ok(self.fail_and_rollback(e));
            }
        };

        let mut stream = stream;
        let mut reply = String::new();

        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => {
                    on_chunk(&chunk);
                    reply.push_str(&chunk);
                }
                Err(e) => {
                    self.streaming = false;
                    return Ok(self.fail_and_rollback(e));
                }
            }
        }

        self.streaming = false;
        self.transcript.append_assistant(reply.clone());
        self.last_error = None;
        info!(reply_len = reply.len(), "Completion committed");
        Ok(SubmitOutcome::Committed(reply))
    }

    /// Rolls back the pending user turn and records the error
    ///
    /// Runs synchronously before control returns to the caller, so the
    /// transcript is never observed with a dangling user turn.
    fn fail_and_rollback(&mut self, error: anyhow::Error) -> SubmitOutcome {
        let description = error.to_string();
        warn!(error = %description, "Completion failed, rolling back user turn");
        self.transcript.rollback_last_user();
        self.last_error = Some(description.clone());
        SubmitOutcome::RolledBack(description)
    }

    /// Read-only snapshot of the current transcript
    pub fn transcript(&self) -> &[ChatTurn] {
        self.transcript.turns()
    }

    /// The active grounding context
    pub fn context(&self) -> &RecipeContext {
        &self.context
    }

    /// True while a completion is in flight
    ///
    /// Callers awaiting `submit` cannot observe this (the exclusive
    /// borrow is held for the duration); it reports a submission that
    /// was abandoned without resolving.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Description of the most recent failure, if any
    ///
    /// Cleared by the next committed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ChunkStream;
    use async_trait::async_trait;

    /// Provider whose stream_complete always fails before streaming.
    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        async fn stream_complete(
            &self,
            _system_instruction: &str,
            _turns: &[ChatTurn],
        ) -> Result<ChunkStream> {
            Err(ChefmateError::Transport("connection refused".to_string()).into())
        }

        async fn complete(&self, _system_instruction: &str, _content: &str) -> Result<String> {
            Err(ChefmateError::Transport("connection refused".to_string()).into())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Provider that panics if called; proves empty submits stay local.
    #[derive(Debug)]
    struct UnreachableProvider;

    #[async_trait]
    impl Provider for UnreachableProvider {
        async fn stream_complete(
            &self,
            _system_instruction: &str,
            _turns: &[ChatTurn],
        ) -> Result<ChunkStream> {
            panic!("provider must not be called");
        }

        async fn complete(&self, _system_instruction: &str, _content: &str) -> Result<String> {
            panic!("provider must not be called");
        }

        fn name(&self) -> &str {
            "unreachable"
        }
    }

    #[tokio::test]
    async fn test_empty_submit_is_ignored_without_network_call() {
        let mut session = ChatSession::new(Arc::new(UnreachableProvider), "hi");
        let outcome = session.submit("   \n\t ", |_| {}).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(session.transcript().len(), 1);
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_failure_rolls_back() {
        let mut session = ChatSession::new(Arc::new(FailingProvider), "hi");
        let before: Vec<ChatTurn> = session.transcript().to_vec();

        let outcome = session.submit("How do I steam rice?", |_| {}).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::RolledBack(_)));
        assert_eq!(session.transcript(), before.as_slice());
        assert!(session.last_error().unwrap().contains("connection refused"));
        assert!(!session.is_streaming());
    }

    #[tokio::test]
    async fn test_set_context_resets_transcript_on_identity_change() {
        let mut session = ChatSession::new(Arc::new(FailingProvider), "hi");
        let _ = session.submit("q", |_| {}).await;
        session.set_context(RecipeContext::from_dish("Tom Yum", "shrimp", "boil"));

        assert_eq!(session.transcript().len(), 1);
        assert!(session.transcript()[0].content.contains("Tom Yum"));
    }

    #[tokio::test]
    async fn test_set_context_same_identity_keeps_transcript() {
        let mut session = ChatSession::new(Arc::new(UnreachableProvider), "hi");
        session.set_context(RecipeContext::from_dish("Tom Yum", "shrimp", "boil"));
        let len_after_switch = session.transcript().len();

        // Same dish again, possibly with refreshed fields
        session.set_context(RecipeContext::from_dish("Tom Yum", "shrimp", "boil the broth"));
        assert_eq!(session.transcript().len(), len_after_switch);
        assert_eq!(session.context().instructions, "boil the broth");
    }

    #[tokio::test]
    async fn test_video_context_greeting() {
        let mut session = ChatSession::new(Arc::new(UnreachableProvider), "hi");
        session.set_context(RecipeContext::from_extracted("vid1", "extracted recipe"));
        assert_eq!(
            session.transcript()[0].content,
            "I've analyzed the video! Ask me anything about this recipe."
        );
    }
}
