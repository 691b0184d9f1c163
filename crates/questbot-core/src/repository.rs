//! Repository abstractions over the relational store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::model::{Artefact, Quest, QuestMark, TimeLoopArtefacts, TimeLoopCounter, User};

/// Registered users and their profiles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns whether a user with this Telegram id is registered.
    async fn user_exists(&self, tg_user_id: i64) -> Result<bool, DomainError>;

    /// Registers a new user with no paid quests.
    ///
    /// Registering the same Telegram id twice is a `Validation` error.
    async fn register(
        &self,
        tg_user_id: i64,
        username: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Changes the display name of a registered user.
    async fn change_username(&self, tg_user_id: i64, username: &str) -> Result<(), DomainError>;

    /// Deletes the user together with their message log and quest progress.
    async fn delete_account(&self, tg_user_id: i64) -> Result<(), DomainError>;

    /// Loads a user, or `None` if not registered.
    async fn find_user(&self, tg_user_id: i64) -> Result<Option<User>, DomainError>;

    /// Ids of the quests the user has bought; empty for unknown users.
    async fn paid_quest_ids(&self, tg_user_id: i64) -> Result<Vec<i64>, DomainError>;
}

/// The quest catalogue.
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Loads a quest, or `None` if it does not exist.
    async fn find_quest(&self, quest_id: i64) -> Result<Option<Quest>, DomainError>;

    /// All quests, ordered by id.
    async fn list_quests(&self) -> Result<Vec<Quest>, DomainError>;

    /// Adds one like or dislike to a quest.
    async fn mark_quest(&self, quest_id: i64, mark: QuestMark) -> Result<(), DomainError>;
}

/// Ids of the bot messages currently visible to each user.
#[async_trait]
pub trait MessageLogRepository: Send + Sync {
    /// Tracked message ids; empty when nothing was tracked yet.
    async fn tracked_messages(&self, tg_user_id: i64) -> Result<Vec<i64>, DomainError>;

    /// Adds message ids to the tracked set. Ids already tracked are ignored.
    async fn track_messages(&self, tg_user_id: i64, message_ids: &[i64]) -> Result<(), DomainError>;

    /// Forgets every tracked message id of the user.
    async fn clear_tracked_messages(&self, tg_user_id: i64) -> Result<(), DomainError>;
}

/// Progress through the Time Loop quest.
#[async_trait]
pub trait TimeLoopRepository: Send + Sync {
    /// Creates a zeroed progress row unless one already exists.
    async fn init_artefacts(&self, tg_user_id: i64) -> Result<(), DomainError>;

    /// Loads the user's progress, or `None` before [`init_artefacts`](Self::init_artefacts).
    async fn artefacts(&self, tg_user_id: i64) -> Result<Option<TimeLoopArtefacts>, DomainError>;

    /// Zeroes every flag and hint counter. The completion counter is kept.
    async fn reset_artefacts(&self, tg_user_id: i64) -> Result<(), DomainError>;

    /// Marks an artefact as collected or lost.
    async fn set_artefact(
        &self,
        tg_user_id: i64,
        artefact: Artefact,
        collected: bool,
    ) -> Result<(), DomainError>;

    /// Adds one to a counter.
    async fn increment_counter(
        &self,
        tg_user_id: i64,
        counter: TimeLoopCounter,
    ) -> Result<(), DomainError>;
}
