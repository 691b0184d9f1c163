//! `PostgreSQL` implementation of the `TimeLoopRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use questbot_core::error::DomainError;
use questbot_core::model::{Artefact, TimeLoopArtefacts, TimeLoopCounter};
use questbot_core::repository::TimeLoopRepository;

use crate::error::infrastructure;

#[derive(sqlx::FromRow)]
struct TimeLoopRow {
    dog: bool,
    safe: bool,
    key: bool,
    safe_tip: i32,
    first_question_tip: i32,
    second_question_tip: i32,
    third_question_tip: i32,
    rate_count: i32,
}

impl From<TimeLoopRow> for TimeLoopArtefacts {
    fn from(row: TimeLoopRow) -> Self {
        Self {
            dog: row.dog,
            safe: row.safe,
            key: row.key,
            safe_tip: row.safe_tip,
            first_question_tip: row.first_question_tip,
            second_question_tip: row.second_question_tip,
            third_question_tip: row.third_question_tip,
            rate_count: row.rate_count,
        }
    }
}

fn flag_column(artefact: Artefact) -> &'static str {
    match artefact {
        Artefact::Dog => "dog",
        Artefact::Safe => "safe",
        Artefact::Key => "key",
    }
}

fn counter_column(counter: TimeLoopCounter) -> &'static str {
    match counter {
        TimeLoopCounter::SafeTip => "safe_tip",
        TimeLoopCounter::FirstQuestionTip => "first_question_tip",
        TimeLoopCounter::SecondQuestionTip => "second_question_tip",
        TimeLoopCounter::ThirdQuestionTip => "third_question_tip",
        TimeLoopCounter::RateCount => "rate_count",
    }
}

/// PostgreSQL-backed Time Loop progress.
#[derive(Debug, Clone)]
pub struct PgTimeLoopRepository {
    pool: PgPool,
}

impl PgTimeLoopRepository {
    /// Creates a new `PgTimeLoopRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeLoopRepository for PgTimeLoopRepository {
    async fn init_artefacts(&self, tg_user_id: i64) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO timeloop (tg_user_id) VALUES ($1) ON CONFLICT (tg_user_id) DO NOTHING",
        )
        .bind(tg_user_id)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(())
    }

    async fn artefacts(&self, tg_user_id: i64) -> Result<Option<TimeLoopArtefacts>, DomainError> {
        let row: Option<TimeLoopRow> = sqlx::query_as(
            "SELECT dog, safe, key, safe_tip, first_question_tip, second_question_tip, \
             third_question_tip, rate_count FROM timeloop WHERE tg_user_id = $1",
        )
        .bind(tg_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        Ok(row.map(TimeLoopArtefacts::from))
    }

    async fn reset_artefacts(&self, tg_user_id: i64) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE timeloop SET dog = FALSE, safe = FALSE, key = FALSE, safe_tip = 0, \
             first_question_tip = 0, second_question_tip = 0, third_question_tip = 0 \
             WHERE tg_user_id = $1",
        )
        .bind(tg_user_id)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(())
    }

    async fn set_artefact(
        &self,
        tg_user_id: i64,
        artefact: Artefact,
        collected: bool,
    ) -> Result<(), DomainError> {
        let statement = format!(
            "UPDATE timeloop SET {} = $1 WHERE tg_user_id = $2",
            flag_column(artefact)
        );
        sqlx::query(&statement)
            .bind(collected)
            .bind(tg_user_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }

    async fn increment_counter(
        &self,
        tg_user_id: i64,
        counter: TimeLoopCounter,
    ) -> Result<(), DomainError> {
        let column = counter_column(counter);
        let statement =
            format!("UPDATE timeloop SET {column} = {column} + 1 WHERE tg_user_id = $1");
        sqlx::query(&statement)
            .bind(tg_user_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}
