//! Update handlers of the narrative context.

pub mod handlers;
