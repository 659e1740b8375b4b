//! Engine configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// SQLite database path
    pub database_path: PathBuf,
    /// Directory for exported audio artifacts
    pub audio_dir: PathBuf,
    /// Directory for exported video artifacts
    pub video_dir: PathBuf,
    /// Lyric generation timeout
    pub lyrics_timeout: Duration,
    /// TTS synthesis timeout
    pub tts_timeout: Duration,
    /// Video render timeout
    pub render_timeout: Duration,
    /// Video output width
    pub video_width: u32,
    /// Video output height
    pub video_height: u32,
    /// Video frame rate
    pub video_fps: u32,
    /// Attempt MP3 transcode of the audio artifact
    pub transcode_mp3: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("studio.db"),
            audio_dir: PathBuf::from("static/audio"),
            video_dir: PathBuf::from("static/video"),
            lyrics_timeout: Duration::from_secs(15),
            tts_timeout: Duration::from_secs(25),
            render_timeout: Duration::from_secs(300),
            video_width: 1920,
            video_height: 1080,
            video_fps: 24,
            transcode_mp3: true,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_path: std::env::var("STUDIO_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            audio_dir: std::env::var("STUDIO_AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_dir),
            video_dir: std::env::var("STUDIO_VIDEO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_dir),
            lyrics_timeout: duration_from_env("STUDIO_LYRICS_TIMEOUT_SECS", 15),
            tts_timeout: duration_from_env("STUDIO_TTS_TIMEOUT_SECS", 25),
            render_timeout: duration_from_env("STUDIO_RENDER_TIMEOUT_SECS", 300),
            video_width: parse_env("STUDIO_VIDEO_WIDTH", 1920),
            video_height: parse_env("STUDIO_VIDEO_HEIGHT", 1080),
            video_fps: parse_env("STUDIO_VIDEO_FPS", 24),
            transcode_mp3: std::env::var("STUDIO_TRANSCODE_MP3")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
        }
    }
}

fn duration_from_env(key: &str, default_secs: u64) -> Duration {
    Duration::from_secs(
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default_secs),
    )
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.video_width, 1920);
        assert_eq!(config.video_fps, 24);
        assert_eq!(config.lyrics_timeout, Duration::from_secs(15));
        assert!(config.transcode_mp3);
    }
}
