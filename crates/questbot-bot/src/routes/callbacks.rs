//! Inline-button callbacks.

use questbot_accounts::application::handlers as accounts;
use questbot_core::callback::Callback;
use questbot_core::error::DomainError;
use questbot_core::services::Services;
use questbot_market::application::{command_handlers, query_handlers};
use questbot_narrative::TIME_LOOP_QUEST_ID;
use questbot_narrative::application::handlers as narrative;
use questbot_narrative::domain::step::TimeLoopStep;
use tracing::{debug, instrument};

/// Routes a button press. Any pending prompt is dropped first; handlers
/// that ask for text arm their prompt again.
///
/// # Errors
///
/// Returns `DomainError` from the state store or the invoked handler.
#[instrument(skip(services))]
pub async fn route_callback(
    services: &Services,
    tg_user_id: i64,
    data: &str,
) -> Result<(), DomainError> {
    services.states.reset(tg_user_id).await?;

    match Callback::parse(data) {
        Callback::Registration => accounts::begin_registration(services, tg_user_id).await,
        Callback::MainMenu => accounts::main_menu(services, tg_user_id).await,
        Callback::Profile => accounts::show_profile(services, tg_user_id).await,
        Callback::ChangeUsername => accounts::begin_username_change(services, tg_user_id).await,
        Callback::DeleteAccount => accounts::confirm_account_deletion(services, tg_user_id).await,
        Callback::ConfirmDeleteAccount => accounts::delete_account(services, tg_user_id).await,
        Callback::Market => query_handlers::show_market(services, tg_user_id).await,
        Callback::MyQuests => query_handlers::show_my_quests(services, tg_user_id).await,
        Callback::PlayQuest(quest_id) => {
            command_handlers::play(services, tg_user_id, quest_id).await
        }
        Callback::ChooseQuest(quest_id) if quest_id == TIME_LOOP_QUEST_ID => {
            narrative::show_intro(services, tg_user_id).await
        }
        Callback::ChooseQuest(quest_id) => {
            command_handlers::quest_unavailable(services, tg_user_id, quest_id).await
        }
        Callback::RateQuest { quest_id, mark } => {
            command_handlers::rate_quest(services, tg_user_id, quest_id, mark).await
        }
        Callback::Story(data) => match TimeLoopStep::parse(&data) {
            Some(step) => narrative::handle_step(services, tg_user_id, step).await,
            None => {
                debug!(%data, "unknown callback");
                Ok(())
            }
        },
    }
}
