//! Update handlers of the market context.

pub mod command_handlers;
pub mod query_handlers;
