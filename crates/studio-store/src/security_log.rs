//! Append-only security event log.

use sqlx::{Row, SqlitePool};

use studio_models::SecurityEvent;

use crate::error::StoreResult;

/// Repository for `security_log` rows.
#[derive(Clone)]
pub struct SecurityLogRepository {
    pool: SqlitePool,
}

impl SecurityLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one event.
    pub async fn append(&self, event: &SecurityEvent) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO security_log (event_type, description, severity, ip_address, user_agent, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(event.severity.as_str())
        .bind(event.client.as_ref().map(|c| c.ip_address.as_str()))
        .bind(event.client.as_ref().map(|c| c.user_agent.as_str()))
        .bind(event.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Recorded event types, oldest first. Test/diagnostic helper; the
    /// core pipeline never reads the log back.
    pub async fn event_types(&self) -> StoreResult<Vec<String>> {
        let rows = sqlx::query("SELECT event_type FROM security_log ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("event_type")).collect())
    }
}
