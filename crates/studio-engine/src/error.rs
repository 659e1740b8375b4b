//! Engine error types.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the orchestrator.
///
/// AI and media failures are normally absorbed by fallbacks inside the
/// pipeline; the variants exist for the seams where those crates' errors
/// pass through (client construction, artifact export).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] studio_store::StoreError),

    #[error("AI service error: {0}")]
    Ai(#[from] studio_ai::AiError),

    #[error("Audio error: {0}")]
    Audio(#[from] studio_audio::AudioError),

    #[error("Media error: {0}")]
    Media(#[from] studio_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Fatal errors abort the generation and mark the record failed;
    /// everything else should have been degraded before reaching the
    /// caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::Storage(_) | EngineError::Io(_) | EngineError::Audio(_)
        )
    }
}
