//! Questbot: narrative context.
//!
//! Runs the "Time Loop" quest: a branching detective story about an uncle
//! stuck in the past, with a safe to crack and three riddles to answer.

pub mod application;
pub mod domain;

/// Quest id under which the Time Loop is listed in the market.
pub const TIME_LOOP_QUEST_ID: i64 = 2;
