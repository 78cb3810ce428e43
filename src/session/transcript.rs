//! Conversation transcript store
//!
//! An append-only, ordered log of chat turns. One transcript is owned by
//! exactly one chat session; independent chat surfaces own independent
//! transcripts and never share state. The only mutations are appending a
//! user turn, appending a completed assistant turn, removing the last
//! turn on failure rollback, and a full reset when the grounding context
//! changes.

use crate::providers::{ChatTurn, Role};
use tracing::debug;

/// Ordered log of chat turns for one conversation
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Creates an empty transcript
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Creates a transcript seeded with one assistant greeting turn
    ///
    /// # Examples
    ///
    /// ```
    /// use chefmate::session::Transcript;
    ///
    /// let transcript = Transcript::with_greeting("Hello!");
    /// assert_eq!(transcript.len(), 1);
    /// ```
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(greeting)],
        }
    }

    /// Appends a user turn
    pub fn append_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::user(content));
    }

    /// Appends a completed assistant turn
    pub fn append_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(content));
    }

    /// Removes the most recently appended turn
    ///
    /// Used exactly once per failed completion, to take back the user
    /// turn that never received an answer. Safe to call on an empty
    /// transcript.
    pub fn rollback_last_user(&mut self) {
        if let Some(removed) = self.turns.pop() {
            debug!(role = ?removed.role, "Rolled back last transcript turn");
        }
    }

    /// Clears all turns and re-seeds with one assistant greeting turn
    pub fn reset(&mut self, greeting: impl Into<String>) {
        self.turns.clear();
        self.turns.push(ChatTurn::assistant(greeting));
    }

    /// Read-only snapshot of the turns, in order
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of turns in the transcript
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when the transcript holds no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last turn, if any
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
    }

    #[test]
    fn test_with_greeting_seeds_one_assistant_turn() {
        let transcript = Transcript::with_greeting("Hello!");
        assert_eq!(transcript.len(), 1);
        let turn = transcript.last().unwrap();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "Hello!");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::with_greeting("hi");
        transcript.append_user("first");
        transcript.append_assistant("second");
        transcript.append_user("third");

        let contents: Vec<&str> = transcript
            .turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["hi", "first", "second", "third"]);
    }

    #[test]
    fn test_rollback_removes_last_turn() {
        let mut transcript = Transcript::with_greeting("hi");
        transcript.append_user("dangling question");
        transcript.rollback_last_user();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().unwrap().content, "hi");
    }

    #[test]
    fn test_rollback_on_empty_is_noop() {
        let mut transcript = Transcript::new();
        transcript.rollback_last_user();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_append_then_rollback_is_identity() {
        let mut transcript = Transcript::with_greeting("hi");
        transcript.append_user("q1");
        transcript.append_assistant("a1");
        let before: Vec<ChatTurn> = transcript.turns().to_vec();

        transcript.append_user("q2");
        transcript.rollback_last_user();

        assert_eq!(transcript.turns(), before.as_slice());
    }

    #[test]
    fn test_reset_reseeds_single_greeting() {
        let mut transcript = Transcript::with_greeting("hi");
        transcript.append_user("q1");
        transcript.append_assistant("a1");
        assert!(transcript.len() > 1);

        transcript.reset("New dish, new chat!");
        assert_eq!(transcript.len(), 1);
        let turn = transcript.last().unwrap();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "New dish, new chat!");
    }
}
