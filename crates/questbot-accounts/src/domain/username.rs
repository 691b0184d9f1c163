//! Validation of the names users pick for themselves.

use questbot_core::error::DomainError;

/// A display name: trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Parses a name typed by the user.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if nothing but whitespace was typed.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("username must not be empty".into()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The name as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
