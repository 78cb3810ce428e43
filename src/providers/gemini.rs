//! Google Gemini completion provider
//!
//! Talks to the Gemini REST API. Notable points of the wire format:
//! - Auth via `?key=API_KEY` query parameter (not header-based)
//! - The system instruction is a top-level `system_instruction` field
//! - Roles are `"user"` / `"model"` (not `"assistant"`)
//! - Streaming uses the `streamGenerateContent` endpoint with `?alt=sse`

use crate::config::GeminiConfig;
use crate::error::{ChefmateError, Result};
use crate::providers::base::{ChatTurn, ChunkStream, Provider, Role};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

/// The default Google Gemini API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini API provider
///
/// Holds the HTTP client and credentials; carries no per-conversation
/// state, so one instance is shared across all chat sessions.
#[derive(Debug)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from configuration
    ///
    /// The API key comes from the config value, falling back to the
    /// `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `ChefmateError::MissingCredentials` when no key can be
    /// resolved, which blocks any session from starting.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                ChefmateError::MissingCredentials(
                    "gemini (set CHEFMATE_GEMINI_API_KEY or GEMINI_API_KEY)".to_string(),
                )
            })?;

        let base_url = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("chefmate/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChefmateError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model: config.model.clone(),
        })
    }

    /// Builds the JSON request body for the Gemini API
    ///
    /// Converts the transcript to Gemini's `contents` format and places
    /// the system instruction as the top-level `system_instruction`
    /// field.
    fn build_request_body(system_instruction: &str, turns: &[ChatTurn]) -> Value {
        let contents: Vec<Value> = turns
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{"text": turn.content}],
                })
            })
            .collect();

        serde_json::json!({
            "contents": contents,
            "system_instruction": {
                "parts": [{"text": system_instruction}]
            },
        })
    }

    /// Extracts the text of one SSE payload
    ///
    /// Concatenates the text parts of the first candidate; payloads that
    /// carry no text (e.g. usage metadata only) yield an empty string.
    fn extract_chunk_text(data: &Value) -> String {
        let mut text = String::new();
        if let Some(parts) = data["candidates"][0]["content"]["parts"].as_array() {
            for part in parts {
                if let Some(t) = part.get("text").and_then(|t| t.as_str()) {
                    text.push_str(t);
                }
            }
        }
        text
    }

    /// Maps an HTTP status code to the appropriate error
    fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> ChefmateError {
        match status.as_u16() {
            401 | 403 => ChefmateError::Authentication(format!(
                "Gemini rejected the API key (HTTP {})",
                status
            )),
            429 => ChefmateError::QuotaExceeded(format!("Gemini rate limit: {}", body_text)),
            _ => ChefmateError::Provider(format!(
                "HTTP {} from Gemini API: {}",
                status, body_text
            )),
        }
    }

    /// Parses a full (non-streaming) response body into its text
    fn parse_response_text(body: &Value) -> Result<String> {
        let candidates = body["candidates"].as_array().ok_or_else(|| {
            ChefmateError::MalformedResponse("Missing 'candidates' array in response".to_string())
        })?;
        if candidates.is_empty() {
            return Err(ChefmateError::MalformedResponse(
                "Empty 'candidates' array in response".to_string(),
            )
            .into());
        }

        let parts = candidates[0]["content"]["parts"].as_array().ok_or_else(|| {
            ChefmateError::MalformedResponse("Missing 'parts' array in candidate".to_string())
        })?;

        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect();
        Ok(text)
    }

    /// Drains an SSE byte stream, forwarding chunk text on the channel
    ///
    /// Lines arrive as `data: {json}\n`; partial lines are buffered
    /// across network chunks. A transport failure mid-stream is
    /// forwarded as an `Err` item and terminates the stream.
    async fn pump_sse(
        mut byte_stream: impl futures::Stream<Item = reqwest::Result<bytes::Bytes>> + Unpin,
        tx: mpsc::Sender<Result<String>>,
    ) {
        let mut line_buffer = String::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(e) => {
                    let _ = tx
                        .send(Err(ChefmateError::Transport(format!(
                            "Failed to read streaming chunk: {}",
                            e
                        ))
                        .into()))
                        .await;
                    return;
                }
            };

            line_buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline_pos) = line_buffer.find('\n') {
                let line = line_buffer[..newline_pos].trim().to_string();
                line_buffer = line_buffer[newline_pos + 1..].to_string();

                if let Some(text) = Self::parse_sse_line(&line) {
                    if !text.is_empty() {
                        let _ = tx.send(Ok(text)).await;
                    }
                }
            }
        }

        // The service may close the stream without a trailing newline.
        let remaining = line_buffer.trim().to_string();
        if let Some(text) = Self::parse_sse_line(&remaining) {
            if !text.is_empty() {
                let _ = tx.send(Ok(text)).await;
            }
        }
    }

    /// Parses one SSE line, returning the chunk text if it carries any
    fn parse_sse_line(line: &str) -> Option<String> {
        let data_str = line.strip_prefix("data: ").or_else(|| {
            line.strip_prefix("data:")
        })?;
        match serde_json::from_str::<Value>(data_str) {
            Ok(data_json) => Some(Self::extract_chunk_text(&data_json)),
            Err(e) => {
                let preview: String = data_str.chars().take(200).collect();
                warn!(error = %e, data_preview = %preview, "Failed to parse SSE JSON chunk");
                None
            }
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn stream_complete(
        &self,
        system_instruction: &str,
        turns: &[ChatTurn],
    ) -> Result<ChunkStream> {
        let body = Self::build_request_body(system_instruction, turns);
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(model = %self.model, turns = turns.len(), "Sending Gemini streaming request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ChefmateError::Transport(format!("Streaming request to Gemini failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::map_http_error(status, &body_text).into());
        }

        let byte_stream = response.bytes_stream();
        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(Self::pump_sse(byte_stream, tx));

        Ok(Box::pin(ReceiverStream::new(rx)))
    }

    async fn complete(&self, system_instruction: &str, content: &str) -> Result<String> {
        let turns = [ChatTurn::user(content)];
        let body = Self::build_request_body(system_instruction, &turns);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(model = %self.model, "Sending Gemini completion request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ChefmateError::Transport(format!("Request to Gemini failed: {}", e)))?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| {
            ChefmateError::Transport(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &body_text).into());
        }

        let response_json: Value = serde_json::from_str(&body_text).map_err(|e| {
            ChefmateError::MalformedResponse(format!("Invalid JSON in response: {}", e))
        })?;

        Self::parse_response_text(&response_json)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
