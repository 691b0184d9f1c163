//! Ready-made records.

use questbot_core::model::{Quest, User};

use crate::clock::registration_time;

/// The Time Loop quest as seeded by the migrations.
#[must_use]
pub fn time_loop_quest() -> Quest {
    Quest {
        id: 2,
        name: "Временная петля".to_owned(),
        description: "Разгадайте тайну исчезновения дяди-археолога, застрявшего в прошлом."
            .to_owned(),
        is_free: true,
        likes: 0,
        dislikes: 0,
    }
}

/// A registered user without purchases.
#[must_use]
pub fn registered_user(tg_user_id: i64, username: &str) -> User {
    User {
        tg_user_id,
        username: username.to_owned(),
        paid_quest_ids: Vec::new(),
        registered_at: registration_time(),
    }
}
