//! Shared test mocks and utilities for the Questbot Telegram quest bot.

mod clock;
mod dialogue;
mod fixtures;
mod harness;
mod messenger;
mod store;

pub use clock::{FixedClock, registration_time};
pub use dialogue::InMemoryStateStore;
pub use fixtures::{registered_user, time_loop_quest};
pub use harness::Harness;
pub use messenger::{FailingMessenger, RecordingMessenger, SentMessage};
pub use store::{FailingStore, InMemoryStore};
