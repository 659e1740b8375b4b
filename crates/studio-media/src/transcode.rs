//! Audio transcoding.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Transcode a WAV file to 320 kbps MP3.
///
/// Fails when FFmpeg is unavailable; callers keep the WAV in that case.
pub async fn encode_mp3(input: &Path, output: &Path, timeout_secs: u64) -> MediaResult<PathBuf> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    debug!("Transcoding {} -> {}", input.display(), output.display());

    let cmd = FfmpegCommand::new(input, output)
        .audio_codec("libmp3lame")
        .audio_bitrate("320k");

    FfmpegRunner::new(timeout_secs).run(&cmd).await?;
    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encode_rejects_missing_input() {
        let result = encode_mp3(
            Path::new("/nonexistent/input.wav"),
            Path::new("/tmp/out.mp3"),
            10,
        )
        .await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
