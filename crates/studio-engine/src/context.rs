//! Shared engine context.
//!
//! One `StudioContext` is constructed at process start and passed by
//! reference into every generation, replacing the module-level singletons
//! of older studio builds.

use studio_ai::{LyricsClient, TtsClient};
use studio_store::{GenerationRepository, LearningRepository, SecurityLogRepository};

use crate::audit::AuditLog;
use crate::config::EngineConfig;
use crate::error::EngineResult;

/// Everything a generation needs: configuration, persistence, clients,
/// and the audit sink.
pub struct StudioContext {
    pub config: EngineConfig,
    pub generations: GenerationRepository,
    pub learning: LearningRepository,
    pub audit: AuditLog,
    pub lyrics_client: LyricsClient,
    pub tts_client: TtsClient,
}

impl StudioContext {
    /// Build a context from configuration and environment-derived clients.
    pub async fn new(config: EngineConfig) -> EngineResult<Self> {
        let pool = studio_store::connect(&config.database_path).await?;
        Self::with_pool(config, pool).await
    }

    /// Build a context over an existing pool with explicit clients.
    pub async fn with_clients(
        config: EngineConfig,
        pool: studio_store::SqlitePool,
        lyrics_client: LyricsClient,
        tts_client: TtsClient,
    ) -> EngineResult<Self> {
        tokio::fs::create_dir_all(&config.audio_dir).await?;
        tokio::fs::create_dir_all(&config.video_dir).await?;

        Ok(Self {
            generations: GenerationRepository::new(pool.clone()),
            learning: LearningRepository::new(pool.clone()),
            audit: AuditLog::new(SecurityLogRepository::new(pool)),
            lyrics_client,
            tts_client,
            config,
        })
    }

    async fn with_pool(config: EngineConfig, pool: studio_store::SqlitePool) -> EngineResult<Self> {
        let lyrics_client = LyricsClient::from_env()?;
        let tts_client = TtsClient::from_env()?;
        Self::with_clients(config, pool, lyrics_client, tts_client).await
    }
}
