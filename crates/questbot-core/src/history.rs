//! Message-history cleanup.
//!
//! Every bot message that belongs to the current "screen" is tracked per user.
//! Moving to another screen sends the new messages first, then deletes the
//! tracked ones, so the chat never flashes empty.

use tracing::{debug, warn};

use crate::error::DomainError;
use crate::messenger::{Messenger, Outgoing};
use crate::repository::MessageLogRepository;

/// Deletes every tracked message of the user and forgets them.
///
/// Messages that can no longer be deleted (too old, already removed by the
/// user) are skipped.
///
/// # Errors
///
/// Returns `DomainError` if the message log cannot be read or cleared.
pub async fn clear_screen(
    messenger: &dyn Messenger,
    log: &dyn MessageLogRepository,
    tg_user_id: i64,
) -> Result<(), DomainError> {
    let tracked = log.tracked_messages(tg_user_id).await?;
    for message_id in tracked {
        if let Err(error) = messenger.delete(tg_user_id, message_id).await {
            debug!(tg_user_id, message_id, %error, "skipping undeletable message");
        }
    }
    log.clear_tracked_messages(tg_user_id).await
}

/// Sends `messages` as the new screen: the previous screen is cleared after
/// the new messages are delivered, then the new ids are tracked.
///
/// When a send fails midway, the messages delivered so far still become the
/// new screen before the error is returned.
///
/// # Errors
///
/// Returns `DomainError` if a message cannot be sent or the log fails.
pub async fn replace_screen(
    messenger: &dyn Messenger,
    log: &dyn MessageLogRepository,
    tg_user_id: i64,
    messages: &[Outgoing],
) -> Result<Vec<i64>, DomainError> {
    let (sent, delivery) = send_all(messenger, tg_user_id, messages).await;
    clear_screen(messenger, log, tg_user_id).await?;
    log.track_messages(tg_user_id, &sent).await?;
    delivery.map(|()| sent)
}

/// Sends `messages` below the current screen and tracks them.
///
/// # Errors
///
/// Returns `DomainError` if a message cannot be sent or the log fails.
pub async fn append_to_screen(
    messenger: &dyn Messenger,
    log: &dyn MessageLogRepository,
    tg_user_id: i64,
    messages: &[Outgoing],
) -> Result<Vec<i64>, DomainError> {
    let (sent, delivery) = send_all(messenger, tg_user_id, messages).await;
    log.track_messages(tg_user_id, &sent).await?;
    delivery.map(|()| sent)
}

/// Adds messages the bot did not send itself, such as the user's own
/// answers, to the current screen.
///
/// # Errors
///
/// Returns `DomainError` if the log fails.
pub async fn track(
    log: &dyn MessageLogRepository,
    tg_user_id: i64,
    message_ids: &[i64],
) -> Result<(), DomainError> {
    log.track_messages(tg_user_id, message_ids).await
}

/// Sends in order and stops at the first failure. Returns the ids delivered
/// before it together with the failure.
async fn send_all(
    messenger: &dyn Messenger,
    tg_user_id: i64,
    messages: &[Outgoing],
) -> (Vec<i64>, Result<(), DomainError>) {
    let mut sent = Vec::with_capacity(messages.len());
    for message in messages {
        match messenger.send(tg_user_id, message).await {
            Ok(message_id) => sent.push(message_id),
            Err(error) => {
                warn!(tg_user_id, delivered = sent.len(), %error, "screen only partly delivered");
                return (sent, Err(error));
            }
        }
    }
    (sent, Ok(()))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::messenger::Content;

    #[derive(Default)]
    struct FakeMessenger {
        next_id: Mutex<i64>,
        deleted: Mutex<Vec<i64>>,
        undeletable: Vec<i64>,
        missing_photos: bool,
    }

    #[async_trait]
    impl Messenger for FakeMessenger {
        async fn send(&self, _tg_user_id: i64, message: &Outgoing) -> Result<i64, DomainError> {
            if self.missing_photos && matches!(message.content, Content::Photo(_)) {
                return Err(DomainError::Delivery("file not found".into()));
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            Ok(*next_id)
        }

        async fn delete(&self, _tg_user_id: i64, message_id: i64) -> Result<(), DomainError> {
            if self.undeletable.contains(&message_id) {
                return Err(DomainError::Delivery("message can't be deleted".into()));
            }
            self.deleted.lock().unwrap().push(message_id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeLog {
        tracked: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl MessageLogRepository for FakeLog {
        async fn tracked_messages(&self, _tg_user_id: i64) -> Result<Vec<i64>, DomainError> {
            Ok(self.tracked.lock().unwrap().clone())
        }

        async fn track_messages(
            &self,
            _tg_user_id: i64,
            message_ids: &[i64],
        ) -> Result<(), DomainError> {
            let mut tracked = self.tracked.lock().unwrap();
            for id in message_ids {
                if !tracked.contains(id) {
                    tracked.push(*id);
                }
            }
            Ok(())
        }

        async fn clear_tracked_messages(&self, _tg_user_id: i64) -> Result<(), DomainError> {
            self.tracked.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_replace_screen_deletes_previous_and_tracks_new() {
        // Arrange
        let messenger = FakeMessenger::default();
        let log = FakeLog::default();
        log.track_messages(1, &[40, 41]).await.unwrap();

        // Act
        let sent = replace_screen(
            &messenger,
            &log,
            1,
            &[Outgoing::text("first"), Outgoing::text("second")],
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(sent, vec![1, 2]);
        assert_eq!(*messenger.deleted.lock().unwrap(), vec![40, 41]);
        assert_eq!(log.tracked_messages(1).await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_clear_screen_skips_undeletable_messages() {
        // Arrange
        let messenger = FakeMessenger {
            undeletable: vec![7],
            ..FakeMessenger::default()
        };
        let log = FakeLog::default();
        log.track_messages(1, &[7, 8]).await.unwrap();

        // Act
        clear_screen(&messenger, &log, 1).await.unwrap();

        // Assert
        assert_eq!(*messenger.deleted.lock().unwrap(), vec![8]);
        assert!(log.tracked_messages(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_to_screen_keeps_previous_messages() {
        // Arrange
        let messenger = FakeMessenger::default();
        let log = FakeLog::default();
        log.track_messages(1, &[40]).await.unwrap();

        // Act
        append_to_screen(&messenger, &log, 1, &[Outgoing::text("hint")])
            .await
            .unwrap();

        // Assert
        assert!(messenger.deleted.lock().unwrap().is_empty());
        assert_eq!(log.tracked_messages(1).await.unwrap(), vec![40, 1]);
    }

    #[tokio::test]
    async fn test_replace_screen_keeps_partly_delivered_screen() {
        // Arrange
        let messenger = FakeMessenger {
            missing_photos: true,
            ..FakeMessenger::default()
        };
        let log = FakeLog::default();
        log.track_messages(1, &[500]).await.unwrap();

        // Act
        let result = replace_screen(
            &messenger,
            &log,
            1,
            &[
                Outgoing::text("diary"),
                Outgoing::photo("Location_device.JPG"),
                Outgoing::text("never sent"),
            ],
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Delivery(_))));
        assert_eq!(*messenger.deleted.lock().unwrap(), vec![500]);
        assert_eq!(log.tracked_messages(1).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_append_to_screen_tracks_messages_before_failure() {
        // Arrange
        let messenger = FakeMessenger {
            missing_photos: true,
            ..FakeMessenger::default()
        };
        let log = FakeLog::default();
        log.track_messages(1, &[40]).await.unwrap();

        // Act
        let result = append_to_screen(
            &messenger,
            &log,
            1,
            &[Outgoing::text("letter"), Outgoing::photo("Key.png")],
        )
        .await;

        // Assert
        assert!(result.is_err());
        assert!(messenger.deleted.lock().unwrap().is_empty());
        assert_eq!(log.tracked_messages(1).await.unwrap(), vec![40, 1]);
    }
}
