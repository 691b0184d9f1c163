//! Per-chat dialogue state: which free-text answer the bot is waiting for.

use async_trait::async_trait;

use crate::error::DomainError;

/// What the next text message of a chat means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatState {
    /// No prompt is pending; text is ignored.
    #[default]
    Idle,
    /// The next text is the name to register with.
    AwaitingUsername,
    /// The next text replaces the current username.
    AwaitingNewUsername,
    /// The next text is a Time Loop safe code.
    AwaitingSafeCode,
    /// The next text answers a Time Loop riddle.
    AwaitingRiddleAnswer {
        /// Zero-based riddle index.
        riddle: u8,
        /// One-based attempt number of the coming answer.
        attempt: u8,
    },
}

/// Storage of [`ChatState`] keyed by chat.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current state; [`ChatState::Idle`] when none was stored.
    async fn state(&self, tg_user_id: i64) -> Result<ChatState, DomainError>;

    /// Replaces the state.
    async fn set_state(&self, tg_user_id: i64, state: ChatState) -> Result<(), DomainError>;

    /// Drops the state, returning the chat to [`ChatState::Idle`].
    async fn reset(&self, tg_user_id: i64) -> Result<(), DomainError>;
}
