//! `PostgreSQL` implementation of the `UserRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use questbot_core::error::DomainError;
use questbot_core::model::User;
use questbot_core::repository::UserRepository;

use crate::error::infrastructure;

#[derive(sqlx::FromRow)]
struct UserRow {
    tg_user_id: i64,
    username: String,
    paid_quest_ids: Vec<i64>,
    registered_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            tg_user_id: row.tg_user_id,
            username: row.username,
            paid_quest_ids: row.paid_quest_ids,
            registered_at: row.registered_at,
        }
    }
}

/// PostgreSQL-backed user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a new `PgUserRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn user_exists(&self, tg_user_id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE tg_user_id = $1)")
            .bind(tg_user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure)
    }

    async fn register(
        &self,
        tg_user_id: i64,
        username: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "INSERT INTO users (tg_user_id, username, paid_quest_ids, registered_at) \
             VALUES ($1, $2, ARRAY[]::BIGINT[], $3)",
        )
        .bind(tg_user_id)
        .bind(username)
        .bind(registered_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(error)) if error.is_unique_violation() => Err(
                DomainError::Validation(format!("user {tg_user_id} is already registered")),
            ),
            Err(error) => Err(infrastructure(error)),
        }
    }

    async fn change_username(&self, tg_user_id: i64, username: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET username = $1 WHERE tg_user_id = $2")
            .bind(username)
            .bind(tg_user_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(tg_user_id));
        }
        Ok(())
    }

    async fn delete_account(&self, tg_user_id: i64) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        for statement in [
            "DELETE FROM user_telegram WHERE tg_user_id = $1",
            "DELETE FROM timeloop WHERE tg_user_id = $1",
            "DELETE FROM users WHERE tg_user_id = $1",
        ] {
            sqlx::query(statement)
                .bind(tg_user_id)
                .execute(&mut *tx)
                .await
                .map_err(infrastructure)?;
        }

        tx.commit().await.map_err(infrastructure)
    }

    async fn find_user(&self, tg_user_id: i64) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT tg_user_id, username, paid_quest_ids, registered_at \
             FROM users WHERE tg_user_id = $1",
        )
        .bind(tg_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        Ok(row.map(User::from))
    }

    async fn paid_quest_ids(&self, tg_user_id: i64) -> Result<Vec<i64>, DomainError> {
        let ids: Option<Vec<i64>> =
            sqlx::query_scalar("SELECT paid_quest_ids FROM users WHERE tg_user_id = $1")
                .bind(tg_user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(infrastructure)?;

        Ok(ids.unwrap_or_default())
    }
}
