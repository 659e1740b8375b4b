//! Database schema bootstrap.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// Create all tables if they do not exist.
pub async fn ensure_schema(pool: &SqlitePool) -> StoreResult<()> {
    debug!("Ensuring studio schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS generations (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            theme TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            voice_style TEXT,
            music_style TEXT,
            lyrics_data TEXT,
            audio_file TEXT,
            video_file TEXT,
            error_message TEXT,
            created_at TEXT NOT NULL,
            completed_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS style_combinations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            theme TEXT NOT NULL,
            music_style TEXT NOT NULL,
            voice_style TEXT NOT NULL,
            rating INTEGER NOT NULL,
            recorded_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS security_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_type TEXT NOT NULL,
            description TEXT,
            severity TEXT NOT NULL DEFAULT 'INFO',
            ip_address TEXT,
            user_agent TEXT,
            recorded_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
