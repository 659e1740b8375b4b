//! Generation record repository.
//!
//! The orchestrator owns a record exclusively for the lifetime of its
//! request; every phase boundary lands here as a narrow column update.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use studio_models::{
    Generation, GenerationId, GenerationStatus, MusicStyle, VoiceStyle,
};

use crate::error::{StoreError, StoreResult};

/// Repository for `generations` rows.
#[derive(Clone)]
pub struct GenerationRepository {
    pool: SqlitePool,
}

impl GenerationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record.
    pub async fn create(&self, generation: &Generation) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO generations
                (id, title, theme, status, voice_style, music_style, lyrics_data,
                 audio_file, video_file, error_message, created_at, completed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(generation.id.as_str())
        .bind(&generation.title)
        .bind(&generation.theme)
        .bind(generation.status.as_str())
        .bind(generation.voice_style.map(|s| s.as_str()))
        .bind(generation.music_style.map(|s| s.as_str()))
        .bind(&generation.lyrics_data)
        .bind(&generation.audio_file)
        .bind(&generation.video_file)
        .bind(&generation.error_message)
        .bind(generation.created_at.to_rfc3339())
        .bind(generation.completed_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        debug!("Created generation {}", generation.id);
        Ok(())
    }

    /// Fetch a record by ID.
    pub async fn get(&self, id: &GenerationId) -> StoreResult<Generation> {
        let row = sqlx::query("SELECT * FROM generations WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;

        row_to_generation(&row)
    }

    /// Move a pending record to generating.
    pub async fn mark_generating(&self, id: &GenerationId) -> StoreResult<()> {
        self.update_status(id, GenerationStatus::Generating).await
    }

    /// Record the lyric document and chosen styles.
    pub async fn set_lyrics_and_styles(
        &self,
        id: &GenerationId,
        lyrics_data: &str,
        voice_style: VoiceStyle,
        music_style: MusicStyle,
    ) -> StoreResult<()> {
        self.expect_updated(
            sqlx::query(
                "UPDATE generations SET lyrics_data = ?, voice_style = ?, music_style = ? WHERE id = ?",
            )
            .bind(lyrics_data)
            .bind(voice_style.as_str())
            .bind(music_style.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected(),
            id,
        )
    }

    /// Record the exported audio artifact.
    pub async fn set_audio_file(&self, id: &GenerationId, path: &str) -> StoreResult<()> {
        self.expect_updated(
            sqlx::query("UPDATE generations SET audio_file = ? WHERE id = ?")
                .bind(path)
                .bind(id.as_str())
                .execute(&self.pool)
                .await?
                .rows_affected(),
            id,
        )
    }

    /// Record the exported video artifact (or placeholder sidecar).
    pub async fn set_video_file(&self, id: &GenerationId, path: &str) -> StoreResult<()> {
        self.expect_updated(
            sqlx::query("UPDATE generations SET video_file = ? WHERE id = ?")
                .bind(path)
                .bind(id.as_str())
                .execute(&self.pool)
                .await?
                .rows_affected(),
            id,
        )
    }

    /// Terminal transition: completed.
    pub async fn complete(&self, id: &GenerationId) -> StoreResult<()> {
        self.expect_updated(
            sqlx::query("UPDATE generations SET status = ?, completed_at = ? WHERE id = ?")
                .bind(GenerationStatus::Completed.as_str())
                .bind(Utc::now().to_rfc3339())
                .bind(id.as_str())
                .execute(&self.pool)
                .await?
                .rows_affected(),
            id,
        )
    }

    /// Terminal transition: failed, with the error message attached.
    pub async fn fail(&self, id: &GenerationId, error: &str) -> StoreResult<()> {
        self.expect_updated(
            sqlx::query(
                "UPDATE generations SET status = ?, error_message = ?, completed_at = ? WHERE id = ?",
            )
            .bind(GenerationStatus::Failed.as_str())
            .bind(error)
            .bind(Utc::now().to_rfc3339())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected(),
            id,
        )
    }

    /// Count records in a given status.
    pub async fn count_by_status(&self, status: GenerationStatus) -> StoreResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM generations WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Total record count.
    pub async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM generations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_status(&self, id: &GenerationId, status: GenerationStatus) -> StoreResult<()> {
        self.expect_updated(
            sqlx::query("UPDATE generations SET status = ? WHERE id = ?")
                .bind(status.as_str())
                .bind(id.as_str())
                .execute(&self.pool)
                .await?
                .rows_affected(),
            id,
        )
    }

    fn expect_updated(&self, rows_affected: u64, id: &GenerationId) -> StoreResult<()> {
        if rows_affected == 0 {
            return Err(StoreError::not_found(id.as_str()));
        }
        Ok(())
    }
}

fn row_to_generation(row: &sqlx::sqlite::SqliteRow) -> StoreResult<Generation> {
    let parse_time = |value: String| {
        DateTime::parse_from_rfc3339(&value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| StoreError::serialization(format!("bad timestamp: {}", e)))
    };

    let status: String = row.get("status");
    let voice_style: Option<String> = row.get("voice_style");
    let music_style: Option<String> = row.get("music_style");
    let completed_at: Option<String> = row.get("completed_at");

    Ok(Generation {
        id: GenerationId::from_string(row.get::<String, _>("id")),
        title: row.get("title"),
        theme: row.get("theme"),
        status: status
            .parse()
            .map_err(|_| StoreError::serialization(format!("bad status: {}", status)))?,
        voice_style: voice_style.and_then(|s| s.parse().ok()),
        music_style: music_style.and_then(|s| s.parse().ok()),
        lyrics_data: row.get("lyrics_data"),
        audio_file: row.get("audio_file"),
        video_file: row.get("video_file"),
        error_message: row.get("error_message"),
        created_at: parse_time(row.get("created_at"))?,
        completed_at: completed_at.map(parse_time).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> GenerationRepository {
        GenerationRepository::new(crate::connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo().await;
        let generation = Generation::new("Epic Battle", "Invictus");
        repo.create(&generation).await.unwrap();

        let loaded = repo.get(&generation.id).await.unwrap();
        assert_eq!(loaded.theme, "Epic Battle");
        assert_eq!(loaded.status, GenerationStatus::Pending);
        assert!(loaded.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = repo().await;
        let result = repo.get(&GenerationId::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_phase_updates() {
        let repo = repo().await;
        let generation = Generation::new("Epic Battle", "Invictus");
        repo.create(&generation).await.unwrap();

        repo.mark_generating(&generation.id).await.unwrap();
        repo.set_lyrics_and_styles(
            &generation.id,
            r#"{"title":"t"}"#,
            VoiceStyle::HeroicMale,
            MusicStyle::Epic,
        )
        .await
        .unwrap();
        repo.set_audio_file(&generation.id, "audio/music.wav")
            .await
            .unwrap();
        repo.set_video_file(&generation.id, "video/cinematic.mp4")
            .await
            .unwrap();
        repo.complete(&generation.id).await.unwrap();

        let loaded = repo.get(&generation.id).await.unwrap();
        assert_eq!(loaded.status, GenerationStatus::Completed);
        assert_eq!(loaded.voice_style, Some(VoiceStyle::HeroicMale));
        assert_eq!(loaded.audio_file.as_deref(), Some("audio/music.wav"));
        assert!(loaded.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_fail_records_message() {
        let repo = repo().await;
        let generation = Generation::new("Epic Battle", "Invictus");
        repo.create(&generation).await.unwrap();

        repo.fail(&generation.id, "storage unavailable").await.unwrap();

        let loaded = repo.get(&generation.id).await.unwrap();
        assert_eq!(loaded.status, GenerationStatus::Failed);
        assert_eq!(loaded.error_message.as_deref(), Some("storage unavailable"));
    }

    #[tokio::test]
    async fn test_counts() {
        let repo = repo().await;
        let first = Generation::new("a thing", "T1");
        let second = Generation::new("another", "T2");
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();
        repo.complete(&first.id).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(
            repo.count_by_status(GenerationStatus::Completed).await.unwrap(),
            1
        );
        assert_eq!(
            repo.count_by_status(GenerationStatus::Pending).await.unwrap(),
            1
        );
    }
}
