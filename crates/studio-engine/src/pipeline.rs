//! The generation pipeline.
//!
//! Phases run in a strict order: lyrics, style selection, voice synthesis,
//! background, mix, audio export, scene planning, video render, commit.
//! Lyric/TTS/render failures degrade to deterministic fallbacks and the
//! generation still completes; validation and storage errors are the only
//! ones a caller sees.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use tracing::info;
use validator::Validate;

use studio_ai::fallback_lyrics;
use studio_audio::{apply_effect_chain, build_background, fallback_voice, mix, AudioTrack};
use studio_media::{write_placeholder, RenderConfig, VideoRenderer};
use studio_models::{
    Generation, GenerationId, GenerationRequest, LyricDocument, MusicStyle, Scene, Severity,
    StyleCombination, VoiceStyle,
};

use crate::context::StudioContext;
use crate::error::{EngineError, EngineResult};
use crate::logging::GenerationLogger;
use crate::scenes::plan_scenes;
use crate::styles::{select_music_style, select_voice_style};

/// Rating recorded for a generation that completed.
const SUCCESS_RATING: u8 = 5;

/// Result handed back to the caller.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub id: GenerationId,
    pub title: String,
    pub voice_style: VoiceStyle,
    pub music_style: MusicStyle,
    pub lyrics: LyricDocument,
    pub audio_file: PathBuf,
    pub video_file: PathBuf,
}

/// Drives one generation end-to-end against a [`StudioContext`].
pub struct GenerationPipeline;

impl GenerationPipeline {
    /// Run the full pipeline for a request.
    pub async fn generate(
        ctx: &StudioContext,
        request: &GenerationRequest,
    ) -> EngineResult<GenerationOutcome> {
        let started = Instant::now();

        // Validation rejects before any record or side effect exists.
        if let Err(e) = request.validate() {
            ctx.audit
                .log(
                    "GENERATION_REJECTED",
                    &format!("Invalid request: {}", e),
                    Severity::Warning,
                )
                .await;
            counter!("studio_generations_total", "status" => "rejected").increment(1);
            return Err(EngineError::validation(e.to_string()));
        }

        let title = request.resolved_title();
        let generation = Generation::new(&request.theme, &title);
        let id = generation.id.clone();
        let logger = GenerationLogger::new(&id);

        ctx.generations.create(&generation).await?;
        ctx.audit
            .log(
                "GENERATION_START",
                &format!("Theme: {}, Title: {}", request.theme, title),
                Severity::Info,
            )
            .await;

        match Self::run_phases(ctx, request, &id, &title, &logger).await {
            Ok(outcome) => {
                counter!("studio_generations_total", "status" => "completed").increment(1);
                histogram!("studio_generation_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                Ok(outcome)
            }
            Err(e) => {
                logger.failed(&e.to_string());
                ctx.audit
                    .log("GENERATION_ERROR", &e.to_string(), Severity::Error)
                    .await;
                counter!("studio_generations_total", "status" => "failed").increment(1);
                // Best effort: the store may be the thing that is broken.
                ctx.generations.fail(&id, &e.to_string()).await.ok();
                Err(e)
            }
        }
    }

    async fn run_phases(
        ctx: &StudioContext,
        request: &GenerationRequest,
        id: &GenerationId,
        title: &str,
        logger: &GenerationLogger,
    ) -> EngineResult<GenerationOutcome> {
        ctx.generations.mark_generating(id).await?;

        // Phase 1: lyrics (bounded, falls back to templates)
        let lyrics = Self::lyrics_phase(ctx, request, title, logger).await;

        // Phase 2: style selection
        let voice_style = select_voice_style(&request.theme);
        let recorded = ctx.learning.recent().await?;
        let music_style = select_music_style(&request.theme, &recorded);
        logger.phase_done(
            "styles",
            &format!("voice={}, music={}", voice_style, music_style),
        );

        let lyrics_json = serde_json::to_string(&lyrics)
            .map_err(|e| studio_store::StoreError::serialization(e.to_string()))?;
        ctx.generations
            .set_lyrics_and_styles(id, &lyrics_json, voice_style, music_style)
            .await?;

        // Phases 3-5: voice, background, mix
        let voice = Self::voice_phase(ctx, &lyrics, voice_style, logger).await;
        let background = build_background(music_style, voice.len_ms());
        logger.phase_done("background", &format!("{}ms of {}", background.len_ms(), music_style));
        let mixed = mix(&voice, &background, music_style);

        // Phase 6: audio export
        let audio_file = Self::export_audio(ctx, id, &mixed, music_style, logger).await?;
        ctx.generations
            .set_audio_file(id, &audio_file.to_string_lossy())
            .await?;
        ctx.audit
            .log(
                "MUSIC_GENERATED",
                &format!("Generated {} music: {}", music_style, audio_file.display()),
                Severity::Info,
            )
            .await;

        // Phase 7: scenes
        let scenes = plan_scenes(&lyrics, voice_style, music_style);
        logger.phase_done("scenes", &format!("{} scenes planned", scenes.len()));

        // Phase 8: video (bounded, falls back to placeholder)
        let video_file = Self::video_phase(ctx, id, &scenes, &audio_file, logger).await;
        ctx.generations
            .set_video_file(id, &video_file.to_string_lossy())
            .await?;

        // Phase 9: commit
        ctx.generations.complete(id).await?;
        ctx.audit
            .log(
                "GENERATION_COMPLETE",
                &format!("Generation {} completed", id),
                Severity::Info,
            )
            .await;

        // Record the combination for future style selection; losing it is
        // not worth failing a finished generation.
        if let Err(e) = ctx
            .learning
            .append(&StyleCombination::new(
                &request.theme,
                music_style,
                voice_style,
                SUCCESS_RATING,
            ))
            .await
        {
            logger.fallback("learning", &e.to_string());
        }

        info!("Completed generation {} ({})", id, title);

        Ok(GenerationOutcome {
            id: id.clone(),
            title: title.to_string(),
            voice_style,
            music_style,
            lyrics,
            audio_file,
            video_file,
        })
    }

    /// Lyric generation with timeout and template fallback.
    async fn lyrics_phase(
        ctx: &StudioContext,
        request: &GenerationRequest,
        title: &str,
        logger: &GenerationLogger,
    ) -> LyricDocument {
        logger.phase_start("lyrics");

        let attempt = tokio::time::timeout(
            ctx.config.lyrics_timeout,
            ctx.lyrics_client.generate(&request.theme, title),
        )
        .await;

        match attempt {
            Ok(Ok(document)) => {
                ctx.audit
                    .log(
                        "LYRICS_GENERATED",
                        &format!("Theme: {}, {} verses", request.theme, document.verses.len()),
                        Severity::Info,
                    )
                    .await;
                document
            }
            Ok(Err(e)) => {
                logger.fallback("lyrics", &e.to_string());
                ctx.audit
                    .log("LYRICS_FALLBACK", &e.to_string(), Severity::Warning)
                    .await;
                fallback_lyrics(&request.theme, title)
            }
            Err(_) => {
                logger.fallback("lyrics", "lyric service timed out");
                ctx.audit
                    .log("LYRICS_FALLBACK", "lyric service timed out", Severity::Warning)
                    .await;
                fallback_lyrics(&request.theme, title)
            }
        }
    }

    /// Voice synthesis with timeout, tone fallback, and the style's
    /// effect chain.
    async fn voice_phase(
        ctx: &StudioContext,
        lyrics: &LyricDocument,
        voice_style: VoiceStyle,
        logger: &GenerationLogger,
    ) -> AudioTrack {
        logger.phase_start("voice");

        let attempt = tokio::time::timeout(
            ctx.config.tts_timeout,
            ctx.tts_client.synthesize(&lyrics.full_text),
        )
        .await;

        let base = match attempt {
            Ok(Ok(bytes)) => match AudioTrack::from_wav_bytes(&bytes) {
                Ok(track) => track,
                Err(e) => {
                    logger.fallback("voice", &format!("undecodable TTS payload: {}", e));
                    ctx.audit
                        .log("VOICE_FALLBACK", &e.to_string(), Severity::Warning)
                        .await;
                    fallback_voice(&lyrics.full_text, voice_style)
                }
            },
            Ok(Err(e)) => {
                logger.fallback("voice", &e.to_string());
                ctx.audit
                    .log("VOICE_FALLBACK", &e.to_string(), Severity::Warning)
                    .await;
                fallback_voice(&lyrics.full_text, voice_style)
            }
            Err(_) => {
                logger.fallback("voice", "TTS service timed out");
                ctx.audit
                    .log("VOICE_FALLBACK", "TTS service timed out", Severity::Warning)
                    .await;
                fallback_voice(&lyrics.full_text, voice_style)
            }
        };

        let processed = apply_effect_chain(base, voice_style);
        logger.phase_done("voice", &format!("{}ms of {}", processed.len_ms(), voice_style));
        processed
    }

    /// Write the mixed track as WAV, then best-effort transcode to MP3.
    async fn export_audio(
        ctx: &StudioContext,
        id: &GenerationId,
        mixed: &AudioTrack,
        music_style: MusicStyle,
        logger: &GenerationLogger,
    ) -> EngineResult<PathBuf> {
        let wav_path = ctx
            .config
            .audio_dir
            .join(format!("music_{}_{}.wav", music_style, id));
        mixed.write_wav(&wav_path)?;

        if !ctx.config.transcode_mp3 {
            return Ok(wav_path);
        }

        let mp3_path = wav_path.with_extension("mp3");
        match studio_media::encode_mp3(&wav_path, &mp3_path, 60).await {
            Ok(path) => {
                tokio::fs::remove_file(&wav_path).await.ok();
                Ok(path)
            }
            Err(e) => {
                // Keep the WAV as the artifact when FFmpeg is unavailable
                logger.fallback("audio_export", &e.to_string());
                Ok(wav_path)
            }
        }
    }

    /// Video render with timeout and placeholder fallback.
    async fn video_phase(
        ctx: &StudioContext,
        id: &GenerationId,
        scenes: &[Scene],
        audio_file: &std::path::Path,
        logger: &GenerationLogger,
    ) -> PathBuf {
        logger.phase_start("video");

        let config = RenderConfig {
            width: ctx.config.video_width,
            height: ctx.config.video_height,
            fps: ctx.config.video_fps,
            timeout_secs: ctx.config.render_timeout.as_secs(),
        };
        let video_path = ctx.config.video_dir.join(format!("cinematic_{}.mp4", id));
        let renderer = VideoRenderer::new(config);

        let attempt = tokio::time::timeout(
            // Outer guard over the renderer's own FFmpeg timeout
            ctx.config.render_timeout + Duration::from_secs(30),
            renderer.render(scenes, audio_file, &video_path),
        )
        .await;

        match attempt {
            Ok(Ok(path)) => {
                ctx.audit
                    .log(
                        "VIDEO_GENERATED",
                        &format!("Generated video: {}", path.display()),
                        Severity::Info,
                    )
                    .await;
                logger.phase_done("video", &path.display().to_string());
                return path;
            }
            Ok(Err(e)) => {
                logger.fallback("video", &e.to_string());
                ctx.audit
                    .log("VIDEO_RENDER_ERROR", &e.to_string(), Severity::Error)
                    .await;
            }
            Err(_) => {
                logger.fallback("video", "render timed out");
                ctx.audit
                    .log("VIDEO_RENDER_ERROR", "render timed out", Severity::Error)
                    .await;
            }
        }

        match write_placeholder(
            &video_path,
            audio_file,
            scenes,
            ctx.config.video_width,
            ctx.config.video_height,
            ctx.config.video_fps,
        ) {
            Ok(sidecar) => sidecar,
            Err(e) => {
                // Last resort: point at the intended path so the record
                // stays consistent even without an artifact on disk.
                logger.fallback("video", &format!("placeholder failed: {}", e));
                video_path
            }
        }
    }
}
