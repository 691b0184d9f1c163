//! Questbot Core: shared domain abstractions.
//!
//! This crate defines the records, ports, and callback vocabulary that every
//! feature crate depends on. It contains no infrastructure code: storage and
//! the Telegram transport live behind the traits declared here.

pub mod callback;
pub mod clock;
pub mod dialogue;
pub mod error;
pub mod history;
pub mod messenger;
pub mod model;
pub mod repository;
pub mod services;
