//! Production wiring of [`Services`].

use std::path::PathBuf;
use std::sync::Arc;

use questbot_core::clock::SystemClock;
use questbot_core::dialogue::ChatState;
use questbot_core::services::Services;
use questbot_store::{
    PgMessageLogRepository, PgQuestRepository, PgTimeLoopRepository, PgUserRepository,
};
use sqlx::PgPool;
use teloxide::Bot;
use teloxide::dispatching::dialogue::InMemStorage;

use crate::dialogue::DialogueStates;
use crate::telegram::TelegramMessenger;

/// Services backed by PostgreSQL, the Telegram API, and `storage`.
#[must_use]
pub fn build_services(
    pool: &PgPool,
    bot: Bot,
    storage: Arc<InMemStorage<ChatState>>,
    media_dir: PathBuf,
) -> Services {
    Services {
        messenger: Arc::new(TelegramMessenger::new(bot)),
        users: Arc::new(PgUserRepository::new(pool.clone())),
        quests: Arc::new(PgQuestRepository::new(pool.clone())),
        message_log: Arc::new(PgMessageLogRepository::new(pool.clone())),
        time_loop: Arc::new(PgTimeLoopRepository::new(pool.clone())),
        states: Arc::new(DialogueStates::new(storage)),
        clock: Arc::new(SystemClock),
        media_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pictures_resolve_inside_uploads_dir() {
        let pool = PgPool::connect_lazy("postgres://localhost/test").unwrap();

        let services = build_services(
            &pool,
            Bot::new("123:test"),
            InMemStorage::new(),
            PathBuf::from("/srv/uploads"),
        );

        assert_eq!(
            services.media("Key.png"),
            PathBuf::from("/srv/uploads/Key.png")
        );
    }
}
