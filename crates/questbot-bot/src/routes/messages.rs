//! Free-text messages, routed by the pending prompt.

use questbot_accounts::application::handlers as accounts;
use questbot_core::dialogue::ChatState;
use questbot_core::error::DomainError;
use questbot_core::services::Services;
use questbot_narrative::application::handlers as narrative;
use tracing::{debug, instrument};

/// Hands `text` to whichever prompt is waiting for it. Messages without
/// text, and text nobody asked for, are ignored.
///
/// # Errors
///
/// Returns `DomainError` from the state store or the invoked handler.
#[instrument(skip(services, text))]
pub async fn route_text(
    services: &Services,
    tg_user_id: i64,
    message_id: i64,
    text: Option<&str>,
) -> Result<(), DomainError> {
    let state = services.states.state(tg_user_id).await?;
    let Some(text) = text else {
        debug!(?state, "ignoring message without text");
        return Ok(());
    };

    match state {
        ChatState::Idle => {
            debug!("ignoring text outside a prompt");
            Ok(())
        }
        ChatState::AwaitingUsername => {
            accounts::complete_registration(services, tg_user_id, text).await
        }
        ChatState::AwaitingNewUsername => {
            accounts::complete_username_change(services, tg_user_id, text).await
        }
        ChatState::AwaitingSafeCode => {
            narrative::check_safe_code(services, tg_user_id, message_id, text).await
        }
        ChatState::AwaitingRiddleAnswer { riddle, attempt } => {
            narrative::answer_riddle(services, tg_user_id, message_id, riddle, attempt, text).await
        }
    }
}
