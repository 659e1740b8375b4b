//! Text-to-speech client.
//!
//! Posts lyric text to a TTS service and returns the raw WAV bytes; the
//! audio engine decodes and processes them. Transport failures are retried
//! once with backoff, everything is bounded by the configured timeout.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AiError, AiResult};

/// Configuration for the TTS client.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Base URL of the TTS service
    pub base_url: String,
    /// Language code sent with every request
    pub language: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries on retryable transport errors
    pub max_retries: u32,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8002".to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(20),
            max_retries: 1,
        }
    }
}

impl TtsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TTS_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8002".to_string()),
            language: std::env::var("TTS_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            timeout: Duration::from_secs(
                std::env::var("TTS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(20),
            ),
            max_retries: std::env::var("TTS_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        }
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// Client for the text-to-speech service.
pub struct TtsClient {
    http: Client,
    config: TtsConfig,
}

impl TtsClient {
    /// Create a new TTS client.
    pub fn new(config: TtsConfig) -> AiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AiResult<Self> {
        Self::new(TtsConfig::from_env())
    }

    /// Synthesize speech for the given text, returning WAV bytes.
    pub async fn synthesize(&self, text: &str) -> AiResult<Vec<u8>> {
        let url = format!("{}/synthesize", self.config.base_url);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.synthesize_once(&url, text).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "TTS request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| AiError::request_failed("TTS retries exhausted")))
    }

    async fn synthesize_once(&self, url: &str, text: &str) -> AiResult<Vec<u8>> {
        debug!("Requesting TTS for {} chars from {}", text.len(), url);

        let response = self
            .http
            .post(url)
            .json(&SynthesizeRequest {
                text,
                language: &self.config.language,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::request_failed(format!(
                "TTS service returned {}: {}",
                status, body
            )));
        }

        let bytes = response.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(AiError::EmptyContent);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String, max_retries: u32) -> TtsClient {
        TtsClient::new(TtsConfig {
            base_url,
            language: "en".to_string(),
            timeout: Duration::from_secs(2),
            max_retries,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_synthesize_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/synthesize"))
            .and(body_json_string(
                r#"{"text":"hello world","language":"en"}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3, 4]))
            .mount(&server)
            .await;

        let client = test_client(server.uri(), 0);
        let bytes = client.synthesize("hello world").await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_synthesize_rejects_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/synthesize"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = test_client(server.uri(), 0);
        assert!(matches!(
            client.synthesize("hello").await,
            Err(AiError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_synthesize_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/synthesize"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/synthesize"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9u8]))
            .mount(&server)
            .await;

        let client = test_client(server.uri(), 1);
        let bytes = client.synthesize("hello").await.unwrap();
        assert_eq!(bytes, vec![9]);
    }

    #[tokio::test]
    async fn test_synthesize_unreachable_service() {
        // Nothing listens on this port
        let client = test_client("http://127.0.0.1:1".to_string(), 0);
        assert!(client.synthesize("hello").await.is_err());
    }
}
