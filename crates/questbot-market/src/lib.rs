//! Questbot: market context.
//!
//! Responsible for the quest catalogue, the list of purchased quests, and
//! quest ratings.

pub mod application;
pub mod domain;
