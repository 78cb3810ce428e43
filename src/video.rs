//! YouTube recipe extraction
//!
//! Parses a video id out of a YouTube URL, fetches the caption
//! transcript (preferring Thai, then English tracks), and asks the
//! completion provider to extract a recipe from it. Extraction failures
//! never replace an existing grounding context; the caller keeps
//! whatever was active before.

use crate::error::{ChefmateError, Result};
use crate::prompts::video_prompt::generate_extraction_instruction;
use crate::providers::Provider;
use crate::recipe::RecipeContext;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Caption track languages to try, in preference order.
const CAPTION_LANGUAGES: &[&str] = &["th", "en"];

/// Default endpoint for YouTube caption tracks.
const DEFAULT_TIMEDTEXT_URL: &str = "https://video.google.com/timedtext";

/// Extracts the video id from a YouTube URL
///
/// Accepts `youtu.be/<id>` and `youtube.com/watch?v=<id>` forms (with
/// or without `www.`); anything else is rejected.
///
/// # Errors
///
/// Returns `InvalidVideoUrl` when the URL cannot be parsed or does not
/// carry a well-formed 11-character video id.
///
/// # Examples
///
/// ```
/// use chefmate::video::parse_video_id;
///
/// let id = parse_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
/// assert_eq!(id, "dQw4w9WgXcQ");
/// ```
pub fn parse_video_id(raw: &str) -> Result<String> {
    let url = Url::parse(raw).map_err(|_| ChefmateError::InvalidVideoUrl(raw.to_string()))?;

    let candidate = match url.host_str() {
        Some("youtu.be") => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        Some("youtube.com") | Some("www.youtube.com") | Some("m.youtube.com")
            if url.path() == "/watch" =>
        {
            url.query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())
        }
        _ => None,
    };

    let id = candidate.ok_or_else(|| ChefmateError::InvalidVideoUrl(raw.to_string()))?;

    let id_pattern = Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("static pattern compiles");
    if !id_pattern.is_match(&id) {
        return Err(ChefmateError::InvalidVideoUrl(raw.to_string()).into());
    }
    Ok(id)
}

/// Fetches caption transcripts for YouTube videos
pub struct TranscriptFetcher {
    client: Client,
    base_url: String,
}

impl TranscriptFetcher {
    /// Creates a fetcher against the real YouTube caption endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_TIMEDTEXT_URL)
    }

    /// Creates a fetcher against a custom endpoint (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("chefmate/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChefmateError::Provider(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetches the caption transcript for a video as plain text
    ///
    /// Tries each preferred language in order and returns the first
    /// non-empty track.
    ///
    /// # Errors
    ///
    /// Returns `NoCaptions` when no preferred track has content, or a
    /// transport error when the endpoint is unreachable or failing. A
    /// 404 means the language has no track and the next preference is
    /// tried; any other non-success status is a service failure, not a
    /// missing track.
    pub async fn fetch(&self, video_id: &str) -> Result<String> {
        for lang in CAPTION_LANGUAGES {
            let url = format!("{}?lang={}&v={}", self.base_url, lang, video_id);
            debug!(video_id, lang, "Fetching caption track");

            let response = self.client.get(&url).send().await.map_err(|e| {
                ChefmateError::Transport(format!("Caption request failed: {}", e))
            })?;

            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                debug!(video_id, lang, "No caption track for language");
                continue;
            }
            if !status.is_success() {
                return Err(ChefmateError::Transport(format!(
                    "Caption endpoint returned HTTP {} for video {}",
                    status, video_id
                ))
                .into());
            }

            let body = response.text().await.map_err(|e| {
                ChefmateError::Transport(format!("Failed to read caption body: {}", e))
            })?;

            let text = caption_xml_to_text(&body);
            if !text.is_empty() {
                info!(video_id, lang, chars = text.len(), "Caption track found");
                return Ok(text);
            }
        }

        Err(ChefmateError::NoCaptions(video_id.to_string()).into())
    }
}

/// Flattens a timedtext XML caption document into plain text
///
/// Pulls the inner text of each `<text ...>` element and unescapes the
/// entities YouTube emits.
fn caption_xml_to_text(xml: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut rest = xml;
    while let Some(open) = rest.find("<text") {
        let Some(tag_end) = rest[open..].find('>') else {
            break;
        };
        let after_tag = &rest[open + tag_end + 1..];
        let Some(close) = after_tag.find("</text>") else {
            break;
        };
        let line = unescape_entities(after_tag[..close].trim());
        if !line.is_empty() {
            lines.push(line);
        }
        rest = &after_tag[close + "</text>".len()..];
    }
    lines.join(" ")
}

fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Extracts a recipe from a YouTube video into a grounding context
///
/// Fetches the caption transcript and asks the provider (one-shot, not
/// streamed) to extract a titled recipe from it.
///
/// # Errors
///
/// Propagates `InvalidVideoUrl`, `NoCaptions`, transport failures, and
/// completion-service errors. On any of these the caller's previously
/// active context stays in place; no context is created here until
/// every step has succeeded.
pub async fn extract_recipe(
    fetcher: &TranscriptFetcher,
    provider: &dyn Provider,
    video_url: &str,
) -> Result<RecipeContext> {
    let video_id = parse_video_id(video_url)?;
    let transcript = fetcher.fetch(&video_id).await?;

    info!(video_id, "Extracting recipe from transcript");
    let recipe_text = provider
        .complete(&generate_extraction_instruction(), &transcript)
        .await?;

    Ok(RecipeContext::from_extracted(&video_id, &recipe_text))
}
