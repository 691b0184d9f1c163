//! `PostgreSQL` implementation of the `MessageLogRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use questbot_core::error::DomainError;
use questbot_core::repository::MessageLogRepository;

use crate::error::infrastructure;

/// Appends to the tracked array in one statement. Ids keep the order in
/// which they were first tracked; repeats are dropped.
const TRACK_MESSAGES: &str = r"
INSERT INTO user_telegram AS ut (tg_user_id, last_message_ids)
VALUES ($1, $2)
ON CONFLICT (tg_user_id) DO UPDATE
SET last_message_ids = ARRAY(
    SELECT t.id
    FROM unnest(ut.last_message_ids || EXCLUDED.last_message_ids)
        WITH ORDINALITY AS t(id, ord)
    GROUP BY t.id
    ORDER BY min(t.ord)
)
";

/// PostgreSQL-backed log of the messages on each user's screen.
#[derive(Debug, Clone)]
pub struct PgMessageLogRepository {
    pool: PgPool,
}

impl PgMessageLogRepository {
    /// Creates a new `PgMessageLogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageLogRepository for PgMessageLogRepository {
    async fn tracked_messages(&self, tg_user_id: i64) -> Result<Vec<i64>, DomainError> {
        let ids: Option<Vec<i64>> =
            sqlx::query_scalar("SELECT last_message_ids FROM user_telegram WHERE tg_user_id = $1")
                .bind(tg_user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(infrastructure)?;

        Ok(ids.unwrap_or_default())
    }

    async fn track_messages(&self, tg_user_id: i64, message_ids: &[i64]) -> Result<(), DomainError> {
        if message_ids.is_empty() {
            return Ok(());
        }

        let mut unique = Vec::with_capacity(message_ids.len());
        for id in message_ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        sqlx::query(TRACK_MESSAGES)
            .bind(tg_user_id)
            .bind(unique)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }

    async fn clear_tracked_messages(&self, tg_user_id: i64) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE user_telegram SET last_message_ids = ARRAY[]::BIGINT[] WHERE tg_user_id = $1",
        )
        .bind(tg_user_id)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        if result.rows_affected() == 0 {
            warn!(tg_user_id, "no message log to clear");
        }
        Ok(())
    }
}
