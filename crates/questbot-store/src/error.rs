//! Conversion of driver errors into domain errors.

use questbot_core::error::DomainError;

/// Wraps any driver error as [`DomainError::Infrastructure`].
pub(crate) fn infrastructure(error: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(error.to_string())
}
