//! Generation records and their status machine.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::lyrics::LyricDocument;
use crate::style::{MusicStyle, StyleParseError, VoiceStyle};

/// Unique identifier for a generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct GenerationId(pub String);

impl GenerationId {
    /// Generate a new random generation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GenerationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a generation.
///
/// Transitions only pending -> generating -> {completed, failed}; once
/// terminal the record is immutable except for administrative action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Record created, pipeline not yet started
    #[default]
    Pending,
    /// Pipeline is running
    Generating,
    /// All phases finished (possibly with degraded artifacts)
    Completed,
    /// Pipeline aborted with an error
    Failed,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Generating => "generating",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Failed)
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GenerationStatus {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(GenerationStatus::Pending),
            "generating" => Ok(GenerationStatus::Generating),
            "completed" => Ok(GenerationStatus::Completed),
            "failed" => Ok(GenerationStatus::Failed),
            other => Err(StyleParseError(other.to_string())),
        }
    }
}

/// An inbound request to generate content from a theme.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct GenerationRequest {
    /// Theme driving lyric, style, and scene selection
    #[validate(length(min = 3, max = 100, message = "theme must be 3-100 characters"))]
    pub theme: String,

    /// Optional song title; derived from the theme when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GenerationRequest {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into().trim().to_string(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The effective title: explicit, or derived from the theme.
    pub fn resolved_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Invictus {}", self.theme))
    }
}

/// One end-to-end content generation, persisted through every phase.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Generation {
    /// Unique generation ID
    pub id: GenerationId,

    /// Song title
    pub title: String,

    /// Requested theme
    pub theme: String,

    /// Lifecycle state
    #[serde(default)]
    pub status: GenerationStatus,

    /// Chosen voice style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_style: Option<VoiceStyle>,

    /// Chosen music style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_style: Option<MusicStyle>,

    /// Serialized lyric document (JSON text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics_data: Option<String>,

    /// Relative path of the exported audio artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,

    /// Relative path of the exported video artifact (or placeholder sidecar)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file: Option<String>,

    /// Error message when status is failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Completion timestamp (set on terminal transition)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Generation {
    /// Create a new pending generation for a request.
    pub fn new(theme: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: GenerationId::new(),
            title: title.into(),
            theme: theme.into(),
            status: GenerationStatus::Pending,
            voice_style: None,
            music_style: None,
            lyrics_data: None,
            audio_file: None,
            video_file: None,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Begin processing.
    pub fn start(mut self) -> Self {
        self.status = GenerationStatus::Generating;
        self
    }

    /// Record the lyric document and chosen styles.
    pub fn with_lyrics(
        mut self,
        lyrics: &LyricDocument,
        voice_style: VoiceStyle,
        music_style: MusicStyle,
    ) -> Self {
        self.lyrics_data = serde_json::to_string(lyrics).ok();
        self.voice_style = Some(voice_style);
        self.music_style = Some(music_style);
        self
    }

    /// Mark the generation completed.
    pub fn complete(mut self) -> Self {
        self.status = GenerationStatus::Completed;
        self.completed_at = Some(Utc::now());
        self
    }

    /// Mark the generation failed with a message.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.status = GenerationStatus::Failed;
        self.error_message = Some(error.into());
        self.completed_at = Some(Utc::now());
        self
    }

    /// Deserialize the stored lyric document, if any.
    pub fn lyrics(&self) -> Option<LyricDocument> {
        self.lyrics_data
            .as_deref()
            .and_then(|data| serde_json::from_str(data).ok())
    }
}
