//! Questbot: PostgreSQL repositories.
//!
//! Implements the repository traits of `questbot-core` over a shared
//! [`sqlx::PgPool`]. The schema lives in the workspace `migrations/`
//! directory and is embedded by [`pool::migrate`].

pub mod message_log;
pub mod pool;
pub mod quests;
pub mod time_loop;
pub mod users;

mod error;

pub use message_log::PgMessageLogRepository;
pub use pool::{ConnectTarget, DatabaseSettings, connect, migrate};
pub use quests::PgQuestRepository;
pub use time_loop::PgTimeLoopRepository;
pub use users::PgUserRepository;
