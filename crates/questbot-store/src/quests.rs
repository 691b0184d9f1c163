//! `PostgreSQL` implementation of the `QuestRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use questbot_core::error::DomainError;
use questbot_core::model::{Quest, QuestMark};
use questbot_core::repository::QuestRepository;

use crate::error::infrastructure;

#[derive(sqlx::FromRow)]
struct QuestRow {
    id: i64,
    name: String,
    description: String,
    is_free: bool,
    likes: i32,
    dislikes: i32,
}

impl From<QuestRow> for Quest {
    fn from(row: QuestRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            is_free: row.is_free,
            likes: row.likes,
            dislikes: row.dislikes,
        }
    }
}

/// PostgreSQL-backed quest catalogue.
#[derive(Debug, Clone)]
pub struct PgQuestRepository {
    pool: PgPool,
}

impl PgQuestRepository {
    /// Creates a new `PgQuestRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestRepository for PgQuestRepository {
    async fn find_quest(&self, quest_id: i64) -> Result<Option<Quest>, DomainError> {
        let row: Option<QuestRow> = sqlx::query_as(
            "SELECT id, name, description, is_free, likes, dislikes FROM quests WHERE id = $1",
        )
        .bind(quest_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        Ok(row.map(Quest::from))
    }

    async fn list_quests(&self) -> Result<Vec<Quest>, DomainError> {
        let rows: Vec<QuestRow> = sqlx::query_as(
            "SELECT id, name, description, is_free, likes, dislikes FROM quests ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        Ok(rows.into_iter().map(Quest::from).collect())
    }

    async fn mark_quest(&self, quest_id: i64, mark: QuestMark) -> Result<(), DomainError> {
        let statement = match mark {
            QuestMark::Like => "UPDATE quests SET likes = likes + 1 WHERE id = $1",
            QuestMark::Dislike => "UPDATE quests SET dislikes = dislikes + 1 WHERE id = $1",
        };

        let result = sqlx::query(statement)
            .bind(quest_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::QuestNotFound(quest_id));
        }
        Ok(())
    }
}
