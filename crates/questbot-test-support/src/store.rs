//! Test stores: in-memory implementations of every repository trait.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questbot_core::error::DomainError;
use questbot_core::model::{
    Artefact, Quest, QuestMark, TimeLoopArtefacts, TimeLoopCounter, User,
};
use questbot_core::repository::{
    MessageLogRepository, QuestRepository, TimeLoopRepository, UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    quests: BTreeMap<i64, Quest>,
    tracked: HashMap<i64, Vec<i64>>,
    time_loop: HashMap<i64, TimeLoopArtefacts>,
}

/// A store that keeps every table in memory and behaves like the
/// PostgreSQL store, including the cascade on account deletion.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose catalogue holds `quests`.
    #[must_use]
    pub fn with_quests(quests: impl IntoIterator<Item = Quest>) -> Self {
        let store = Self::new();
        for quest in quests {
            store.insert_quest(quest);
        }
        store
    }

    /// Inserts or replaces a user row.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_user(&self, user: User) {
        self.tables
            .lock()
            .unwrap()
            .users
            .insert(user.tg_user_id, user);
    }

    /// Inserts or replaces a quest row.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_quest(&self, quest: Quest) {
        self.tables.lock().unwrap().quests.insert(quest.id, quest);
    }

    /// Inserts or replaces a Time Loop progress row.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_progress(&self, tg_user_id: i64, artefacts: TimeLoopArtefacts) {
        self.tables
            .lock()
            .unwrap()
            .time_loop
            .insert(tg_user_id, artefacts);
    }

    /// Snapshot of a user row.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn user_record(&self, tg_user_id: i64) -> Option<User> {
        self.tables.lock().unwrap().users.get(&tg_user_id).cloned()
    }

    /// Snapshot of a quest row.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn quest_record(&self, quest_id: i64) -> Option<Quest> {
        self.tables.lock().unwrap().quests.get(&quest_id).cloned()
    }

    /// Snapshot of a Time Loop progress row.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn progress(&self, tg_user_id: i64) -> Option<TimeLoopArtefacts> {
        self.tables
            .lock()
            .unwrap()
            .time_loop
            .get(&tg_user_id)
            .copied()
    }

    /// Snapshot of the tracked message ids of a user.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn tracked_ids(&self, tg_user_id: i64) -> Vec<i64> {
        self.tables
            .lock()
            .unwrap()
            .tracked
            .get(&tg_user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn user_exists(&self, tg_user_id: i64) -> Result<bool, DomainError> {
        Ok(self.tables.lock().unwrap().users.contains_key(&tg_user_id))
    }

    async fn register(
        &self,
        tg_user_id: i64,
        username: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.contains_key(&tg_user_id) {
            return Err(DomainError::Validation(format!(
                "user {tg_user_id} is already registered"
            )));
        }
        tables.users.insert(
            tg_user_id,
            User {
                tg_user_id,
                username: username.to_owned(),
                paid_quest_ids: Vec::new(),
                registered_at,
            },
        );
        Ok(())
    }

    async fn change_username(&self, tg_user_id: i64, username: &str) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .get_mut(&tg_user_id)
            .ok_or(DomainError::UserNotFound(tg_user_id))?;
        username.clone_into(&mut user.username);
        Ok(())
    }

    async fn delete_account(&self, tg_user_id: i64) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        tables.tracked.remove(&tg_user_id);
        tables.time_loop.remove(&tg_user_id);
        tables.users.remove(&tg_user_id);
        Ok(())
    }

    async fn find_user(&self, tg_user_id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.user_record(tg_user_id))
    }

    async fn paid_quest_ids(&self, tg_user_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self
            .user_record(tg_user_id)
            .map(|user| user.paid_quest_ids)
            .unwrap_or_default())
    }
}

#[async_trait]
impl QuestRepository for InMemoryStore {
    async fn find_quest(&self, quest_id: i64) -> Result<Option<Quest>, DomainError> {
        Ok(self.quest_record(quest_id))
    }

    async fn list_quests(&self) -> Result<Vec<Quest>, DomainError> {
        Ok(self.tables.lock().unwrap().quests.values().cloned().collect())
    }

    async fn mark_quest(&self, quest_id: i64, mark: QuestMark) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let quest = tables
            .quests
            .get_mut(&quest_id)
            .ok_or(DomainError::QuestNotFound(quest_id))?;
        match mark {
            QuestMark::Like => quest.likes += 1,
            QuestMark::Dislike => quest.dislikes += 1,
        }
        Ok(())
    }
}

#[async_trait]
impl MessageLogRepository for InMemoryStore {
    async fn tracked_messages(&self, tg_user_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self.tracked_ids(tg_user_id))
    }

    async fn track_messages(&self, tg_user_id: i64, message_ids: &[i64]) -> Result<(), DomainError> {
        if message_ids.is_empty() {
            return Ok(());
        }
        let mut tables = self.tables.lock().unwrap();
        let tracked = tables.tracked.entry(tg_user_id).or_default();
        for id in message_ids {
            if !tracked.contains(id) {
                tracked.push(*id);
            }
        }
        Ok(())
    }

    async fn clear_tracked_messages(&self, tg_user_id: i64) -> Result<(), DomainError> {
        if let Some(tracked) = self.tables.lock().unwrap().tracked.get_mut(&tg_user_id) {
            tracked.clear();
        }
        Ok(())
    }
}

#[async_trait]
impl TimeLoopRepository for InMemoryStore {
    async fn init_artefacts(&self, tg_user_id: i64) -> Result<(), DomainError> {
        self.tables
            .lock()
            .unwrap()
            .time_loop
            .entry(tg_user_id)
            .or_default();
        Ok(())
    }

    async fn artefacts(&self, tg_user_id: i64) -> Result<Option<TimeLoopArtefacts>, DomainError> {
        Ok(self.progress(tg_user_id))
    }

    async fn reset_artefacts(&self, tg_user_id: i64) -> Result<(), DomainError> {
        if let Some(row) = self.tables.lock().unwrap().time_loop.get_mut(&tg_user_id) {
            *row = TimeLoopArtefacts {
                rate_count: row.rate_count,
                ..TimeLoopArtefacts::default()
            };
        }
        Ok(())
    }

    async fn set_artefact(
        &self,
        tg_user_id: i64,
        artefact: Artefact,
        collected: bool,
    ) -> Result<(), DomainError> {
        if let Some(row) = self.tables.lock().unwrap().time_loop.get_mut(&tg_user_id) {
            match artefact {
                Artefact::Dog => row.dog = collected,
                Artefact::Safe => row.safe = collected,
                Artefact::Key => row.key = collected,
            }
        }
        Ok(())
    }

    async fn increment_counter(
        &self,
        tg_user_id: i64,
        counter: TimeLoopCounter,
    ) -> Result<(), DomainError> {
        if let Some(row) = self.tables.lock().unwrap().time_loop.get_mut(&tg_user_id) {
            let value = match counter {
                TimeLoopCounter::SafeTip => &mut row.safe_tip,
                TimeLoopCounter::FirstQuestionTip => &mut row.first_question_tip,
                TimeLoopCounter::SecondQuestionTip => &mut row.second_question_tip,
                TimeLoopCounter::ThirdQuestionTip => &mut row.third_question_tip,
                TimeLoopCounter::RateCount => &mut row.rate_count,
            };
            *value += 1;
        }
        Ok(())
    }
}

fn unavailable<T>() -> Result<T, DomainError> {
    Err(DomainError::Infrastructure("connection refused".into()))
}

/// A store whose every call returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl UserRepository for FailingStore {
    async fn user_exists(&self, _tg_user_id: i64) -> Result<bool, DomainError> {
        unavailable()
    }

    async fn register(
        &self,
        _tg_user_id: i64,
        _username: &str,
        _registered_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        unavailable()
    }

    async fn change_username(&self, _tg_user_id: i64, _username: &str) -> Result<(), DomainError> {
        unavailable()
    }

    async fn delete_account(&self, _tg_user_id: i64) -> Result<(), DomainError> {
        unavailable()
    }

    async fn find_user(&self, _tg_user_id: i64) -> Result<Option<User>, DomainError> {
        unavailable()
    }

    async fn paid_quest_ids(&self, _tg_user_id: i64) -> Result<Vec<i64>, DomainError> {
        unavailable()
    }
}

#[async_trait]
impl QuestRepository for FailingStore {
    async fn find_quest(&self, _quest_id: i64) -> Result<Option<Quest>, DomainError> {
        unavailable()
    }

    async fn list_quests(&self) -> Result<Vec<Quest>, DomainError> {
        unavailable()
    }

    async fn mark_quest(&self, _quest_id: i64, _mark: QuestMark) -> Result<(), DomainError> {
        unavailable()
    }
}

#[async_trait]
impl MessageLogRepository for FailingStore {
    async fn tracked_messages(&self, _tg_user_id: i64) -> Result<Vec<i64>, DomainError> {
        unavailable()
    }

    async fn track_messages(
        &self,
        _tg_user_id: i64,
        _message_ids: &[i64],
    ) -> Result<(), DomainError> {
        unavailable()
    }

    async fn clear_tracked_messages(&self, _tg_user_id: i64) -> Result<(), DomainError> {
        unavailable()
    }
}

#[async_trait]
impl TimeLoopRepository for FailingStore {
    async fn init_artefacts(&self, _tg_user_id: i64) -> Result<(), DomainError> {
        unavailable()
    }

    async fn artefacts(&self, _tg_user_id: i64) -> Result<Option<TimeLoopArtefacts>, DomainError> {
        unavailable()
    }

    async fn reset_artefacts(&self, _tg_user_id: i64) -> Result<(), DomainError> {
        unavailable()
    }

    async fn set_artefact(
        &self,
        _tg_user_id: i64,
        _artefact: Artefact,
        _collected: bool,
    ) -> Result<(), DomainError> {
        unavailable()
    }

    async fn increment_counter(
        &self,
        _tg_user_id: i64,
        _counter: TimeLoopCounter,
    ) -> Result<(), DomainError> {
        unavailable()
    }
}
