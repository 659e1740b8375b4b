//! End-to-end pipeline tests.
//!
//! These run the real pipeline against a temp SQLite database with AI
//! endpoints pointed at an unreachable port, exercising the degraded
//! paths: every generation must still complete with artifacts on disk.

use std::time::Duration;

use studio_ai::{LyricsClient, LyricsConfig, TtsClient, TtsConfig};
use studio_engine::{EngineConfig, EngineError, GenerationPipeline, StudioContext};
use studio_models::{GenerationRequest, GenerationStatus, MusicStyle, VoiceStyle};

/// Context with unreachable AI services and tiny timeouts.
async fn offline_context(dir: &std::path::Path) -> StudioContext {
    let config = EngineConfig {
        database_path: dir.join("studio.db"),
        audio_dir: dir.join("audio"),
        video_dir: dir.join("video"),
        lyrics_timeout: Duration::from_millis(500),
        tts_timeout: Duration::from_millis(500),
        render_timeout: Duration::from_secs(30),
        video_width: 64,
        video_height: 36,
        video_fps: 2,
        transcode_mp3: false,
    };

    let pool = studio_store::connect(&config.database_path).await.unwrap();

    // Port 9 (discard) is never listening
    let lyrics_client = LyricsClient::new(LyricsConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        model: "test".to_string(),
        api_key: Some("test-key".to_string()),
        timeout: Duration::from_millis(200),
    })
    .unwrap();
    let tts_client = TtsClient::new(TtsConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        language: "en".to_string(),
        timeout: Duration::from_millis(200),
        max_retries: 0,
    })
    .unwrap();

    StudioContext::with_clients(config, pool, lyrics_client, tts_client)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_generation_completes_without_external_services() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = offline_context(dir.path()).await;

    let request = GenerationRequest::new("Epic Battle of Champions");
    let outcome = GenerationPipeline::generate(&ctx, &request).await.unwrap();

    // Keyword tables: battle -> heroic voice; no music keyword -> epic
    assert_eq!(outcome.voice_style, VoiceStyle::HeroicMale);
    assert_eq!(outcome.music_style, MusicStyle::Epic);

    // Fallback lyrics are non-empty
    assert!(!outcome.lyrics.full_text.is_empty());
    assert!(!outcome.lyrics.verses.is_empty());

    // Audio artifact exists and is non-trivial
    assert!(outcome.audio_file.exists());
    assert!(std::fs::metadata(&outcome.audio_file).unwrap().len() > 1000);

    // Video artifact exists: a real render if FFmpeg is present, the
    // placeholder sidecar otherwise
    assert!(outcome.video_file.exists());

    // Record reached completed with artifacts attached
    let record = ctx.generations.get(&outcome.id).await.unwrap();
    assert_eq!(record.status, GenerationStatus::Completed);
    assert!(record.audio_file.is_some());
    assert!(record.video_file.is_some());
    assert!(record.completed_at.is_some());
    assert_eq!(record.lyrics().unwrap(), outcome.lyrics);
}

#[tokio::test]
async fn test_empty_theme_is_rejected_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = offline_context(dir.path()).await;

    let request = GenerationRequest::new("");
    let result = GenerationPipeline::generate(&ctx, &request).await;
    assert!(matches!(result, Err(EngineError::Validation(_))));

    // No record was created
    assert_eq!(ctx.generations.count().await.unwrap(), 0);

    // No audio artifact was produced
    let audio_entries = std::fs::read_dir(dir.path().join("audio")).unwrap().count();
    assert_eq!(audio_entries, 0);
}

#[tokio::test]
async fn test_lyric_timeout_falls_back_to_templates() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = offline_context(dir.path()).await;

    let request = GenerationRequest::new("battle hymn").with_title("March");
    let outcome = GenerationPipeline::generate(&ctx, &request).await.unwrap();

    // The battle template was selected
    assert!(outcome.lyrics.full_text.contains("Warriors gather in the dawn"));
    assert_eq!(outcome.title, "March");

    let record = ctx.generations.get(&outcome.id).await.unwrap();
    assert_eq!(record.status, GenerationStatus::Completed);
}

#[tokio::test]
async fn test_learning_feeds_later_style_selection() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = offline_context(dir.path()).await;

    // A completed generation records its combination.
    let first = GenerationPipeline::generate(&ctx, &GenerationRequest::new("shadow march"))
        .await
        .unwrap();
    assert_eq!(first.music_style, MusicStyle::Dark);

    let recorded = ctx.learning.recent().await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].music_style, MusicStyle::Dark);

    // A recorded combination outranks the keyword table: "ocean voyage"
    // has no music keyword (would default to Epic), but a prior "voyage"
    // combination redirects it.
    ctx.learning
        .append(&studio_models::StyleCombination::new(
            "voyage",
            MusicStyle::Gregorian,
            VoiceStyle::Choir,
            5,
        ))
        .await
        .unwrap();

    let second = GenerationPipeline::generate(&ctx, &GenerationRequest::new("ocean voyage"))
        .await
        .unwrap();
    assert_eq!(second.music_style, MusicStyle::Gregorian);
}

#[tokio::test]
async fn test_storage_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = offline_context(dir.path()).await;

    // Break the store out from under the pipeline
    let pool = studio_store::connect(&dir.path().join("studio.db"))
        .await
        .unwrap();
    sqlx_drop_generations(&pool).await;

    let request = GenerationRequest::new("Epic Battle");
    let result = GenerationPipeline::generate(&ctx, &request).await;

    match result {
        Err(EngineError::Storage(_)) => {}
        other => panic!("expected storage error, got {:?}", other.map(|o| o.id)),
    }
}

async fn sqlx_drop_generations(pool: &studio_store::SqlitePool) {
    sqlx::query("DROP TABLE generations")
        .execute(pool)
        .await
        .unwrap();
}
