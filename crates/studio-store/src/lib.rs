//! SQLite persistence for CodeCraft Studio.
//!
//! The store is the source of truth once the orchestrator commits: one
//! `generations` row per request mutated at each phase boundary, the
//! bounded `style_combinations` learning table, and the append-only
//! `security_log`.

pub mod error;
pub mod generations;
pub mod learning;
pub mod schema;
pub mod security_log;

pub use error::{StoreError, StoreResult};
pub use sqlx::SqlitePool;
pub use generations::GenerationRepository;
pub use learning::LearningRepository;
pub use security_log::SecurityLogRepository;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

/// Open (creating if missing) the studio database and bootstrap its schema.
pub async fn connect(path: &Path) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    schema::ensure_schema(&pool).await?;
    Ok(pool)
}

/// Open an in-memory database for tests.
pub async fn connect_in_memory() -> StoreResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    schema::ensure_schema(&pool).await?;
    Ok(pool)
}
