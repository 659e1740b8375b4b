//! Bounded style-combination table.
//!
//! Append-only with oldest-first eviction past [`LEARNING_CAPACITY`]
//! rows. The append and the prune run against the same pool, so
//! concurrent generations cannot lose updates.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use studio_models::{StyleCombination, LEARNING_CAPACITY};

use crate::error::{StoreError, StoreResult};

/// Repository for `style_combinations` rows.
#[derive(Clone)]
pub struct LearningRepository {
    pool: SqlitePool,
}

impl LearningRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a combination and evict beyond capacity.
    pub async fn append(&self, combination: &StyleCombination) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO style_combinations (theme, music_style, voice_style, rating, recorded_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&combination.theme)
        .bind(combination.music_style.as_str())
        .bind(combination.voice_style.as_str())
        .bind(combination.rating as i64)
        .bind(combination.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM style_combinations
            WHERE id NOT IN (
                SELECT id FROM style_combinations ORDER BY id DESC LIMIT ?
            )
            "#,
        )
        .bind(LEARNING_CAPACITY as i64)
        .execute(&self.pool)
        .await?;

        debug!("Recorded style combination for theme '{}'", combination.theme);
        Ok(())
    }

    /// All retained combinations, newest first.
    pub async fn recent(&self) -> StoreResult<Vec<StyleCombination>> {
        let rows = sqlx::query(
            "SELECT theme, music_style, voice_style, rating, recorded_at \
             FROM style_combinations ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let music: String = row.get("music_style");
                let voice: String = row.get("voice_style");
                let recorded_at: String = row.get("recorded_at");
                Ok(StyleCombination {
                    theme: row.get("theme"),
                    music_style: music
                        .parse()
                        .map_err(|_| StoreError::serialization(format!("bad style: {}", music)))?,
                    voice_style: voice
                        .parse()
                        .map_err(|_| StoreError::serialization(format!("bad style: {}", voice)))?,
                    rating: row.get::<i64, _>("rating") as u8,
                    recorded_at: DateTime::parse_from_rfc3339(&recorded_at)
                        .map(|t| t.with_timezone(&Utc))
                        .map_err(|e| StoreError::serialization(format!("bad timestamp: {}", e)))?,
                })
            })
            .collect()
    }
}
