//! Update handlers of the accounts context.

pub mod handlers;
