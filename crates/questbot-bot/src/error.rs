//! Questbot: startup error types.

use thiserror::Error;

/// Errors that stop the bot before or while it starts polling.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration could not be applied.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// File system error (log file, uploads directory).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Telegram rejected a startup request.
    #[error("telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_the_problem() {
        let error = AppError::Config("TELEGRAM_BOT_TOKEN must be set".into());
        assert_eq!(
            error.to_string(),
            "configuration error: TELEGRAM_BOT_TOKEN must be set"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let error: AppError = std::io::Error::other("disk full").into();
        assert!(matches!(error, AppError::Io(_)));
        assert_eq!(error.to_string(), "io error: disk full");
    }
}
