//! Shared test helpers: a scripted completion provider.

use async_trait::async_trait;
use chefmate::error::{ChefmateError, Result};
use chefmate::providers::{ChatTurn, ChunkStream, Provider};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One scripted reply from the provider.
#[derive(Debug)]
pub enum ScriptedResponse {
    /// A stream of items; `Err` entries become transport failures
    /// delivered mid-stream.
    Stream(Vec<std::result::Result<String, String>>),
    /// The request itself fails before any chunk is produced.
    StartError(String),
}

/// Provider that replays a fixed script of responses and records what
/// it was asked.
#[derive(Debug)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    calls: AtomicUsize,
    last_instruction: Mutex<Option<String>>,
    last_turns: Mutex<Vec<ChatTurn>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            last_instruction: Mutex::new(None),
            last_turns: Mutex::new(Vec::new()),
        }
    }

    /// A provider that streams the given chunks and completes cleanly.
    pub fn with_chunks(chunks: &[&str]) -> Self {
        Self::new(vec![ScriptedResponse::Stream(
            chunks.iter().map(|c| Ok(c.to_string())).collect(),
        )])
    }

    /// Number of completion requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The system instruction of the most recent request.
    pub fn last_instruction(&self) -> Option<String> {
        self.last_instruction.lock().unwrap().clone()
    }

    /// The transcript of the most recent request.
    pub fn last_turns(&self) -> Vec<ChatTurn> {
        self.last_turns.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn stream_complete(
        &self,
        system_instruction: &str,
        turns: &[ChatTurn],
    ) -> Result<ChunkStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_instruction.lock().unwrap() = Some(system_instruction.to_string());
        *self.last_turns.lock().unwrap() = turns.to_vec();

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScriptedResponse::Stream(Vec::new()));

        match response {
            ScriptedResponse::StartError(message) => {
                Err(ChefmateError::Transport(message).into())
            }
            ScriptedResponse::Stream(items) => {
                let items: Vec<Result<String>> = items
                    .into_iter()
                    .map(|item| {
                        item.map_err(|message| ChefmateError::Transport(message).into())
                    })
                    .collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
        }
    }

    async fn complete(&self, system_instruction: &str, content: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_instruction.lock().unwrap() = Some(system_instruction.to_string());
        *self.last_turns.lock().unwrap() = vec![ChatTurn::user(content)];

        match self.responses.lock().unwrap().pop_front() {
            Some(ScriptedResponse::Stream(items)) => {
                let mut text = String::new();
                for item in items {
                    match item {
                        Ok(chunk) => text.push_str(&chunk),
                        Err(message) => return Err(ChefmateError::Transport(message).into()),
                    }
                }
                Ok(text)
            }
            Some(ScriptedResponse::StartError(message)) => {
                Err(ChefmateError::Transport(message).into())
            }
            None => Ok(String::new()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
