//! Conversational session management
//!
//! One `ChatSession` per chat surface: it owns the transcript and the
//! active grounding context, and runs the streaming completion protocol.

pub mod chat;
pub mod transcript;

pub use chat::{ChatSession, SubmitOutcome};
pub use transcript::Transcript;
