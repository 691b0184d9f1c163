//! Ports handed to every handler.

use std::path::PathBuf;
use std::sync::Arc;

use crate::clock::Clock;
use crate::dialogue::StateStore;
use crate::error::DomainError;
use crate::history;
use crate::messenger::{Messenger, Outgoing};
use crate::repository::{MessageLogRepository, QuestRepository, TimeLoopRepository, UserRepository};

/// Shared handles to storage, transport, and dialogue state.
#[derive(Clone)]
pub struct Services {
    /// Telegram transport.
    pub messenger: Arc<dyn Messenger>,
    /// Registered users.
    pub users: Arc<dyn UserRepository>,
    /// Quest catalogue.
    pub quests: Arc<dyn QuestRepository>,
    /// Messages on each user's screen.
    pub message_log: Arc<dyn MessageLogRepository>,
    /// Time Loop progress.
    pub time_loop: Arc<dyn TimeLoopRepository>,
    /// Pending free-text prompts.
    pub states: Arc<dyn StateStore>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Directory holding quest pictures.
    pub media_dir: PathBuf,
}

impl Services {
    /// Path of a quest picture inside the media directory.
    #[must_use]
    pub fn media(&self, file_name: &str) -> PathBuf {
        self.media_dir.join(file_name)
    }

    /// See [`history::replace_screen`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if sending or tracking fails.
    pub async fn replace_screen(
        &self,
        tg_user_id: i64,
        messages: &[Outgoing],
    ) -> Result<Vec<i64>, DomainError> {
        history::replace_screen(&*self.messenger, &*self.message_log, tg_user_id, messages).await
    }

    /// See [`history::append_to_screen`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if sending or tracking fails.
    pub async fn append_to_screen(
        &self,
        tg_user_id: i64,
        messages: &[Outgoing],
    ) -> Result<Vec<i64>, DomainError> {
        history::append_to_screen(&*self.messenger, &*self.message_log, tg_user_id, messages).await
    }

    /// See [`history::clear_screen`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the message log fails.
    pub async fn clear_screen(&self, tg_user_id: i64) -> Result<(), DomainError> {
        history::clear_screen(&*self.messenger, &*self.message_log, tg_user_id).await
    }

    /// Tracks a message the user sent, so it is cleaned up with the screen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the message log fails.
    pub async fn track_incoming(&self, tg_user_id: i64, message_id: i64) -> Result<(), DomainError> {
        history::track(&*self.message_log, tg_user_id, &[message_id]).await
    }
}
