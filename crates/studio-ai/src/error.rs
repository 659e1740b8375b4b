//! AI client error types.

use thiserror::Error;

/// Result type for AI service calls.
pub type AiResult<T> = Result<T, AiError>;

/// Errors from the lyric and TTS collaborators.
///
/// All variants are recoverable at the orchestrator level via fallbacks;
/// none should abort a generation.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key not configured: {0}")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service returned empty content")]
    EmptyContent,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AiError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Check if a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::Network(e) => e.is_timeout() || e.is_connect(),
            AiError::RequestFailed(_) => true,
            _ => false,
        }
    }
}
