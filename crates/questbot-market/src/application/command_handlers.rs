//! Command handlers for the market context.

use questbot_accounts::application::handlers as accounts;
use questbot_core::error::DomainError;
use questbot_core::messenger::Outgoing;
use questbot_core::model::QuestMark;
use questbot_core::services::Services;
use tracing::{info, instrument};

use crate::domain::screens;

/// Starts a purchased quest. Purchased quests cannot be played yet, so the
/// user is returned to the main menu.
///
/// # Errors
///
/// Returns `DomainError` if delivery fails.
#[instrument(skip(services))]
pub async fn play(services: &Services, tg_user_id: i64, quest_id: i64) -> Result<(), DomainError> {
    info!(quest_id, "purchased quest requested");
    accounts::main_menu(services, tg_user_id).await
}

/// Records a like or dislike and thanks the user.
///
/// # Errors
///
/// Returns `DomainError::QuestNotFound` if the quest does not exist, or
/// another `DomainError` if storage or delivery fails.
#[instrument(skip(services))]
pub async fn rate_quest(
    services: &Services,
    tg_user_id: i64,
    quest_id: i64,
    mark: QuestMark,
) -> Result<(), DomainError> {
    services.quests.mark_quest(quest_id, mark).await?;
    info!(quest_id, ?mark, "quest rated");
    services
        .replace_screen(tg_user_id, &[screens::rating_thanks(mark)])
        .await?;
    Ok(())
}

/// Tells the user the chosen quest cannot be started.
///
/// # Errors
///
/// Returns `DomainError` if delivery fails.
#[instrument(skip(services))]
pub async fn quest_unavailable(
    services: &Services,
    tg_user_id: i64,
    quest_id: i64,
) -> Result<(), DomainError> {
    services
        .append_to_screen(tg_user_id, &[Outgoing::text(screens::QUEST_LAUNCH_FAILED)])
        .await?;
    Ok(())
}
