//! In-memory `StateStore`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use questbot_core::dialogue::{ChatState, StateStore};
use questbot_core::error::DomainError;

/// Dialogue states kept in a map.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    states: Mutex<HashMap<i64, ChatState>>,
}

impl InMemoryStateStore {
    /// Current state of a chat, without going through the async trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn current(&self, tg_user_id: i64) -> ChatState {
        self.states
            .lock()
            .unwrap()
            .get(&tg_user_id)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn state(&self, tg_user_id: i64) -> Result<ChatState, DomainError> {
        Ok(self.current(tg_user_id))
    }

    async fn set_state(&self, tg_user_id: i64, state: ChatState) -> Result<(), DomainError> {
        self.states.lock().unwrap().insert(tg_user_id, state);
        Ok(())
    }

    async fn reset(&self, tg_user_id: i64) -> Result<(), DomainError> {
        self.states.lock().unwrap().remove(&tg_user_id);
        Ok(())
    }
}
