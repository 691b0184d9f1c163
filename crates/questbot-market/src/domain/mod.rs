//! Screens of the market context.

pub mod screens;
