//! Questbot: Telegram front end.
//!
//! Wires the feature crates to teloxide and PostgreSQL. The binary in
//! `main.rs` only loads configuration and starts the dispatcher.

pub mod config;
pub mod dialogue;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;
pub mod telegram;
