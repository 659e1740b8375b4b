//! Scene video assembly.
//!
//! Frames are rasterized per scene into a staging directory, then encoded
//! and muxed with the audio track in a single FFmpeg pass. Each scene's
//! lyric line is overlaid with a `drawtext` filter bounded to the scene's
//! time span.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use studio_models::Scene;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::frames::render_frame;

/// Lyric overlay lines longer than this are truncated with an ellipsis.
const OVERLAY_MAX_CHARS: usize = 60;

/// Scene spans are clamped to this range before frame counting, so a
/// malformed timing cannot explode the frame budget.
const MIN_SCENE_SECS: f64 = 1.0;
const MAX_SCENE_SECS: f64 = 60.0;

/// Video output configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Hard timeout for the FFmpeg encode
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 24,
            timeout_secs: 300,
        }
    }
}

/// Renders scene sequences into a muxed video file.
pub struct VideoRenderer {
    config: RenderConfig,
}

impl VideoRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render scenes against an audio file into `output`.
    ///
    /// Fails with [`MediaError`] when FFmpeg is missing, times out, or the
    /// encode fails; the caller degrades to the placeholder sidecar.
    pub async fn render(
        &self,
        scenes: &[Scene],
        audio_file: &Path,
        output: &Path,
    ) -> MediaResult<PathBuf> {
        if scenes.is_empty() {
            return Err(MediaError::NoScenes);
        }
        if !audio_file.exists() {
            return Err(MediaError::FileNotFound(audio_file.to_path_buf()));
        }

        let staging = tempfile::tempdir()?;
        let frame_count = self.write_frames(scenes, staging.path())?;
        info!(
            "Rendering {} scenes ({} frames) to {}",
            scenes.len(),
            frame_count,
            output.display()
        );

        let pattern = staging.path().join("frame_%06d.png");
        let cmd = FfmpegCommand::new(&pattern, output)
            .framerate(self.config.fps)
            .extra_input(audio_file)
            .video_filter(self.overlay_filter(scenes))
            .video_codec("libx264")
            .pixel_format("yuv420p")
            .audio_codec("aac")
            .shortest();

        FfmpegRunner::new(self.config.timeout_secs).run(&cmd).await?;
        Ok(output.to_path_buf())
    }

    /// Rasterize every scene's frames into the staging directory,
    /// sequentially numbered across scenes. Returns the total frame count.
    fn write_frames(&self, scenes: &[Scene], staging: &Path) -> MediaResult<usize> {
        let mut frame_index = 0usize;

        for scene in scenes {
            let span_secs = scene
                .timing
                .duration_secs()
                .clamp(MIN_SCENE_SECS, MAX_SCENE_SECS);
            let frames = (span_secs * self.config.fps as f64).round() as usize;
            debug!(
                "Scene {} ({}): {} frames",
                scene.index, scene.category, frames
            );

            for i in 0..frames {
                let t = i as f32 / frames.max(1) as f32;
                let frame = render_frame(
                    scene.category,
                    scene.index,
                    t,
                    self.config.width,
                    self.config.height,
                );
                let path = staging.join(format!("frame_{:06}.png", frame_index));
                frame
                    .save(&path)
                    .map_err(|e| MediaError::frame_encoding(e.to_string()))?;
                frame_index += 1;
            }
        }

        Ok(frame_index)
    }

    /// One `drawtext` clause per scene, enabled for its time span.
    fn overlay_filter(&self, scenes: &[Scene]) -> String {
        let mut offset_secs = 0.0f64;
        let clauses: Vec<String> = scenes
            .iter()
            .map(|scene| {
                let span = scene
                    .timing
                    .duration_secs()
                    .clamp(MIN_SCENE_SECS, MAX_SCENE_SECS);
                let start = offset_secs;
                offset_secs += span;
                format!(
                    "drawtext=text='{}':font=Sans:fontsize=48:fontcolor=white:\
                     box=1:boxcolor=black@0.4:x=(w-text_w)/2:y=h-120:\
                     enable='between(t,{:.2},{:.2})'",
                    escape_drawtext(&truncate_overlay(&scene.lyrics)),
                    start,
                    offset_secs,
                )
            })
            .collect();
        clauses.join(",")
    }
}

/// Truncate an overlay line above the length threshold.
fn truncate_overlay(text: &str) -> String {
    let text = text.trim().replace('\n', " ");
    if text.chars().count() <= OVERLAY_MAX_CHARS {
        return text;
    }
    let truncated: String = text.chars().take(OVERLAY_MAX_CHARS).collect();
    format!("{}...", truncated.trim_end())
}

/// Escape characters that are special inside a drawtext value.
fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace(',', "\\,")
        .replace('%', "\\%")
}
