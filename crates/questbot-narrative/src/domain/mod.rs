//! The Time Loop script and its puzzles.

pub mod answer;
pub mod endings;
pub mod riddles;
pub mod safe;
pub mod script;
pub mod step;
