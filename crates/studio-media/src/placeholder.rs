//! Degraded-mode placeholder artifact.
//!
//! When rendering fails, the generation still completes with a metadata
//! sidecar standing in for the video. The sidecar is not playable; it
//! references the audio artifact and describes what would have been
//! rendered.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use studio_models::Scene;

use crate::error::MediaResult;

/// Metadata written in place of a failed video render.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceholderInfo {
    /// Path the video would have been written to
    pub video_file: String,
    /// Audio artifact the video would have been muxed with
    pub audio_file: String,
    pub resolution: String,
    pub frame_rate: u32,
    pub scene_count: usize,
    pub scene_categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Write a `{video}.json` sidecar and return its path.
pub fn write_placeholder(
    video_path: &Path,
    audio_file: &Path,
    scenes: &[Scene],
    width: u32,
    height: u32,
    fps: u32,
) -> MediaResult<PathBuf> {
    let info = PlaceholderInfo {
        video_file: video_path.to_string_lossy().to_string(),
        audio_file: audio_file.to_string_lossy().to_string(),
        resolution: format!("{}x{}", width, height),
        frame_rate: fps,
        scene_count: scenes.len(),
        scene_categories: scenes.iter().map(|s| s.category.to_string()).collect(),
        created_at: Utc::now(),
    };

    let sidecar = video_path.with_extension("json");
    std::fs::write(&sidecar, serde_json::to_string_pretty(&info)?)?;

    info!("Wrote video placeholder sidecar: {}", sidecar.display());
    Ok(sidecar)
}
