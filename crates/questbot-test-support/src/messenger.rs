//! Test messengers: mock `Messenger` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use questbot_core::error::DomainError;
use questbot_core::messenger::{Content, Messenger, Outgoing};

/// First id handed out by [`RecordingMessenger`].
const FIRST_MESSAGE_ID: i64 = 1000;

/// A message captured by [`RecordingMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Id assigned to the message.
    pub id: i64,
    /// Recipient chat.
    pub tg_user_id: i64,
    /// What was sent.
    pub message: Outgoing,
}

impl SentMessage {
    /// Text body, or `[photo <file name>]` for photos.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.message.content {
            Content::Text(text) => text.clone(),
            Content::Photo(path) => format!(
                "[photo {}]",
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ),
        }
    }

    /// Callback data of the attached keyboard, top to bottom.
    #[must_use]
    pub fn callbacks(&self) -> Vec<String> {
        self.message
            .keyboard
            .as_ref()
            .map(|keyboard| keyboard.callbacks().map(str::to_owned).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
struct Recorded {
    next_id: i64,
    sent: Vec<SentMessage>,
    deleted: Vec<i64>,
    undeletable: Vec<i64>,
}

/// A messenger that records every send and delete. Message ids are assigned
/// sequentially starting at 1000.
#[derive(Debug)]
pub struct RecordingMessenger {
    recorded: Mutex<Recorded>,
}

impl Default for RecordingMessenger {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingMessenger {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            recorded: Mutex::new(Recorded {
                next_id: FIRST_MESSAGE_ID,
                sent: Vec::new(),
                deleted: Vec::new(),
                undeletable: Vec::new(),
            }),
        }
    }

    /// Makes deleting `message_id` fail, as Telegram does for old messages.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn refuse_delete(&self, message_id: i64) {
        self.recorded.lock().unwrap().undeletable.push(message_id);
    }

    /// Snapshot of every message sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        self.recorded.lock().unwrap().sent.clone()
    }

    /// Summaries of every message sent so far, see [`SentMessage::summary`].
    #[must_use]
    pub fn summaries(&self) -> Vec<String> {
        self.sent().iter().map(SentMessage::summary).collect()
    }

    /// The most recent message.
    #[must_use]
    pub fn last(&self) -> Option<SentMessage> {
        self.sent().pop()
    }

    /// Ids of every deleted message, in deletion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn deleted(&self) -> Vec<i64> {
        self.recorded.lock().unwrap().deleted.clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, tg_user_id: i64, message: &Outgoing) -> Result<i64, DomainError> {
        let mut recorded = self.recorded.lock().unwrap();
        let id = recorded.next_id;
        recorded.next_id += 1;
        recorded.sent.push(SentMessage {
            id,
            tg_user_id,
            message: message.clone(),
        });
        Ok(id)
    }

    async fn delete(&self, _tg_user_id: i64, message_id: i64) -> Result<(), DomainError> {
        let mut recorded = self.recorded.lock().unwrap();
        if recorded.undeletable.contains(&message_id) {
            return Err(DomainError::Delivery(
                "Bad Request: message can't be deleted".into(),
            ));
        }
        recorded.deleted.push(message_id);
        Ok(())
    }
}

/// A messenger whose every call fails. Useful for testing error paths.
#[derive(Debug)]
pub struct FailingMessenger;

#[async_trait]
impl Messenger for FailingMessenger {
    async fn send(&self, _tg_user_id: i64, _message: &Outgoing) -> Result<i64, DomainError> {
        Err(DomainError::Delivery("bot was blocked by the user".into()))
    }

    async fn delete(&self, _tg_user_id: i64, _message_id: i64) -> Result<(), DomainError> {
        Err(DomainError::Delivery("bot was blocked by the user".into()))
    }
}
