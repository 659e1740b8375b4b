//! Lyric-generation client.
//!
//! Talks to a chat-completions API (OpenAI wire format) with a fixed
//! lyricist prompt and a JSON response schema, and parses the reply into a
//! [`LyricDocument`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use studio_models::LyricDocument;

use crate::error::{AiError, AiResult};

/// Configuration for the lyrics client.
#[derive(Debug, Clone)]
pub struct LyricsConfig {
    /// Base URL of the chat-completions API
    pub base_url: String,
    /// Model name requested
    pub model: String,
    /// API key; requests fail fast when absent
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            api_key: None,
            timeout: Duration::from_secs(15),
        }
    }
}

impl LyricsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("LYRICS_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: std::env::var("LYRICS_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            timeout: Duration::from_secs(
                std::env::var("LYRICS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(15),
            ),
        }
    }
}

/// Chat-completions request.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat-completions response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the lyric-generation service.
pub struct LyricsClient {
    http: Client,
    config: LyricsConfig,
}

impl LyricsClient {
    /// Create a new lyrics client.
    pub fn new(config: LyricsConfig) -> AiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AiResult<Self> {
        Self::new(LyricsConfig::from_env())
    }

    /// Generate a lyric document for a theme and title.
    ///
    /// Fails on missing API key, transport errors, or a malformed/empty
    /// document; the caller is expected to fall back to templates.
    pub async fn generate(&self, theme: &str, title: &str) -> AiResult<LyricDocument> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey("OPENAI_API_KEY not set".to_string()))?;

        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a master lyricist who creates epic, cinematic song lyrics. \
                              Always respond with valid JSON."
                        .to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(theme, title),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        debug!("Requesting lyrics from {} (model {})", url, self.config.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::request_failed(format!(
                "lyrics API returned {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or(AiError::EmptyContent)?;

        let document: LyricDocument = serde_json::from_str(strip_code_fences(content))?;
        if !document.is_well_formed() {
            return Err(AiError::invalid_response(
                "lyric document has no text or no verses",
            ));
        }

        info!(
            "Generated lyrics: '{}' with {} verses",
            document.title,
            document.verses.len()
        );
        Ok(document)
    }
}

/// Build the fixed lyric prompt for a theme and title.
fn build_prompt(theme: &str, title: &str) -> String {
    format!(
        r#"Create powerful, cinematic lyrics for a song titled "{title}" with the theme "{theme}".

Generate lyrics that are:
- Epic and emotionally resonant
- Suitable for orchestral/cinematic music
- Structured with verses, choruses, and a bridge
- Inspiring and uplifting

Return ONLY a single JSON object with this schema:
{{
  "title": "{title}",
  "theme": "{theme}",
  "full_text": "complete song lyrics as one text",
  "verses": [
    {{"type": "verse", "lyrics": "verse 1 lyrics here", "timing": "0:00-0:30"}},
    {{"type": "chorus", "lyrics": "chorus lyrics here", "timing": "0:30-1:00"}},
    {{"type": "bridge", "lyrics": "bridge lyrics here", "timing": "1:00-1:30"}}
  ]
}}

Additional instructions:
- Timings are "M:SS-M:SS" ranges covering the song in order.
- Each verse entry must have non-empty lyrics.
"#
    )
}

/// Strip Markdown code fences some models wrap around JSON payloads.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> LyricsClient {
        LyricsClient::new(LyricsConfig {
            base_url,
            model: "test-model".to_string(),
            api_key: Some("test-key".to_string()),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    fn lyric_json() -> String {
        serde_json::json!({
            "title": "Invictus",
            "theme": "battle",
            "full_text": "Warriors gather in the dawn",
            "verses": [
                {"type": "verse", "lyrics": "Warriors gather in the dawn", "timing": "0:00-0:30"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_parses_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": lyric_json()}}]
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let document = client.generate("battle", "Invictus").await.unwrap();
        assert_eq!(document.title, "Invictus");
        assert_eq!(document.verses.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_strips_code_fences() {
        let server = MockServer::start().await;
        let fenced = format!("```json\n{}\n```", lyric_json());
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": fenced}}]
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(client.generate("battle", "Invictus").await.is_ok());
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_verses() {
        let server = MockServer::start().await;
        let empty = serde_json::json!({
            "title": "t", "theme": "t", "full_text": "text", "verses": []
        })
        .to_string();
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": empty}}]
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(matches!(
            client.generate("battle", "Invictus").await,
            Err(AiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(matches!(
            client.generate("battle", "Invictus").await,
            Err(AiError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_fast() {
        let client = LyricsClient::new(LyricsConfig {
            api_key: None,
            ..LyricsConfig::default()
        })
        .unwrap();
        assert!(matches!(
            client.generate("battle", "Invictus").await,
            Err(AiError::MissingApiKey(_))
        ));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }
}
