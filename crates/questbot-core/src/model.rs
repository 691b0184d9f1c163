//! Records stored by the bot, one per relational row.

use chrono::{DateTime, Utc};

/// A registered bot user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Telegram user id; also the private chat id.
    pub tg_user_id: i64,
    /// Name the user chose at registration.
    pub username: String,
    /// Quests the user has bought.
    pub paid_quest_ids: Vec<i64>,
    /// When the user registered.
    pub registered_at: DateTime<Utc>,
}

/// A quest listed in the market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    /// Quest identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short description shown on the market card.
    pub description: String,
    /// Whether the quest can be played without buying it.
    pub is_free: bool,
    /// Number of "like" ratings.
    pub likes: i32,
    /// Number of "dislike" ratings.
    pub dislikes: i32,
}

impl Quest {
    /// Price label shown on quest cards.
    #[must_use]
    pub fn price_label(&self) -> &'static str {
        if self.is_free { "free" } else { "$" }
    }

    /// Text of the quest card used by the market and "my quests" lists.
    #[must_use]
    pub fn card_text(&self) -> String {
        format!(
            "Название: «{}»\nОписание: {}\n{}❤️   {}🙁\n{}",
            self.name,
            self.description,
            self.likes,
            self.dislikes,
            self.price_label()
        )
    }
}

/// A rating left after finishing a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestMark {
    /// ❤️
    Like,
    /// 🙁
    Dislike,
}

/// Collectable items of the Time Loop quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artefact {
    /// The puppy Kopernik was taken from the laboratory.
    Dog,
    /// The locked box in the cupboard was opened.
    Safe,
    /// The "Key of Time" was found.
    Key,
}

/// Per-user counters of the Time Loop quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLoopCounter {
    /// Wrong safe-code attempts.
    SafeTip,
    /// Wrong answers to the first riddle.
    FirstQuestionTip,
    /// Wrong answers to the second riddle.
    SecondQuestionTip,
    /// Wrong answers to the third riddle.
    ThirdQuestionTip,
    /// Completed runs with the happy ending.
    RateCount,
}

/// Time Loop progress of one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLoopArtefacts {
    /// See [`Artefact::Dog`].
    pub dog: bool,
    /// See [`Artefact::Safe`].
    pub safe: bool,
    /// See [`Artefact::Key`].
    pub key: bool,
    pub safe_tip: i32,
    pub first_question_tip: i32,
    pub second_question_tip: i32,
    pub third_question_tip: i32,
    /// Survives [`reset`](crate::repository::TimeLoopRepository::reset_artefacts).
    pub rate_count: i32,
}

impl TimeLoopArtefacts {
    /// Returns whether the given artefact has been collected.
    #[must_use]
    pub fn has(&self, artefact: Artefact) -> bool {
        match artefact {
            Artefact::Dog => self.dog,
            Artefact::Safe => self.safe,
            Artefact::Key => self.key,
        }
    }

    /// Returns the current value of a counter.
    #[must_use]
    pub fn counter(&self, counter: TimeLoopCounter) -> i32 {
        match counter {
            TimeLoopCounter::SafeTip => self.safe_tip,
            TimeLoopCounter::FirstQuestionTip => self.first_question_tip,
            TimeLoopCounter::SecondQuestionTip => self.second_question_tip,
            TimeLoopCounter::ThirdQuestionTip => self.third_question_tip,
            TimeLoopCounter::RateCount => self.rate_count,
        }
    }
}
