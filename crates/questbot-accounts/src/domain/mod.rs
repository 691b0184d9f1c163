//! Screens and input rules of the accounts context.

pub mod screens;
pub mod username;
