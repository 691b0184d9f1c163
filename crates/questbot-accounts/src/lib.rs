//! Questbot: accounts context.
//!
//! Responsible for registration, the main menu, the profile screen,
//! username changes, and account deletion.

pub mod application;
pub mod domain;
