//! Slash commands.

use questbot_accounts::application::handlers as accounts;
use questbot_core::error::DomainError;
use questbot_core::services::Services;
use teloxide::utils::command::BotCommands;
use tracing::instrument;

/// Commands understood by the bot.
#[derive(BotCommands, Debug, Clone, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    /// `/start`
    #[command(description = "начать работу с ботом")]
    Start,
}

/// Runs a command.
///
/// # Errors
///
/// Returns `DomainError` from the invoked handler.
pub async fn handle(services: &Services, tg_user_id: i64, command: Command) -> Result<(), DomainError> {
    match command {
        Command::Start => start(services, tg_user_id).await,
    }
}

/// `/start` drops any pending prompt and shows the entry screen.
///
/// # Errors
///
/// Returns `DomainError` if the state store, storage, or delivery fails.
#[instrument(skip(services))]
pub async fn start(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    services.states.reset(tg_user_id).await?;
    accounts::start(services, tg_user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_command_parses() {
        assert_eq!(Command::parse("/start", "questbot").unwrap(), Command::Start);
        assert!(Command::parse("/stop", "questbot").is_err());
    }
}
