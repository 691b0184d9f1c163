//! [`StateStore`] kept in teloxide's in-memory dialogue storage.

use std::sync::Arc;

use async_trait::async_trait;
use questbot_core::dialogue::{ChatState, StateStore};
use questbot_core::error::DomainError;
use teloxide::dispatching::dialogue::{InMemStorage, Storage};
use teloxide::types::ChatId;

/// Pending prompts per chat. Lost on restart.
#[derive(Clone)]
pub struct DialogueStates {
    storage: Arc<InMemStorage<ChatState>>,
}

impl DialogueStates {
    /// Wraps an existing storage.
    #[must_use]
    pub fn new(storage: Arc<InMemStorage<ChatState>>) -> Self {
        Self { storage }
    }
}

impl Default for DialogueStates {
    fn default() -> Self {
        Self::new(InMemStorage::new())
    }
}

#[async_trait]
impl StateStore for DialogueStates {
    async fn state(&self, tg_user_id: i64) -> Result<ChatState, DomainError> {
        let state = Arc::clone(&self.storage)
            .get_dialogue(ChatId(tg_user_id))
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        Ok(state.unwrap_or_default())
    }

    async fn set_state(&self, tg_user_id: i64, state: ChatState) -> Result<(), DomainError> {
        Arc::clone(&self.storage)
            .update_dialogue(ChatId(tg_user_id), state)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))
    }

    async fn reset(&self, tg_user_id: i64) -> Result<(), DomainError> {
        self.set_state(tg_user_id, ChatState::Idle).await
    }
}
