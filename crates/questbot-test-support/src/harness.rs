//! Wiring of mocks into [`Services`].

use std::path::PathBuf;
use std::sync::Arc;

use questbot_core::services::Services;

use crate::clock::FixedClock;
use crate::dialogue::InMemoryStateStore;
use crate::messenger::RecordingMessenger;
use crate::store::{FailingStore, InMemoryStore};

/// In-memory store, recording messenger, and state store bundled together.
/// Tests keep the harness to inspect what the handlers did.
#[derive(Debug, Default)]
pub struct Harness {
    /// Every table.
    pub store: Arc<InMemoryStore>,
    /// Every message sent or deleted.
    pub messenger: Arc<RecordingMessenger>,
    /// Pending prompts.
    pub states: Arc<InMemoryStateStore>,
    /// Fixed at 2026-01-15 10:00:00 UTC.
    pub clock: FixedClock,
}

impl Harness {
    /// Creates a harness around `store`.
    #[must_use]
    pub fn with_store(store: InMemoryStore) -> Self {
        Self {
            store: Arc::new(store),
            ..Self::default()
        }
    }

    /// Services backed by the harness.
    #[must_use]
    pub fn services(&self) -> Services {
        Services {
            messenger: self.messenger.clone(),
            users: self.store.clone(),
            quests: self.store.clone(),
            message_log: self.store.clone(),
            time_loop: self.store.clone(),
            states: self.states.clone(),
            clock: Arc::new(self.clock),
            media_dir: PathBuf::from("uploads"),
        }
    }

    /// Services whose storage always fails; messenger and states are the
    /// harness's own.
    #[must_use]
    pub fn services_with_failing_storage(&self) -> Services {
        let store = Arc::new(FailingStore);
        Services {
            users: store.clone(),
            quests: store.clone(),
            message_log: store.clone(),
            time_loop: store,
            ..self.services()
        }
    }
}
