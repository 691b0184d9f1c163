//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No registered user with the given Telegram id.
    #[error("user not found: {0}")]
    UserNotFound(i64),

    /// No quest with the given id.
    #[error("quest not found: {0}")]
    QuestNotFound(i64),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The messenger failed to deliver or delete a message.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
