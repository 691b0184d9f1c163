//! Dispatcher schema and routing of updates to the feature crates.
//!
//! Every update runs inside an `update` span carrying a fresh
//! `correlation_id`. Handler failures are logged there and the dispatcher
//! moves on to the next update.

pub mod callbacks;
pub mod commands;
pub mod messages;

use std::future::Future;

use questbot_core::error::DomainError;
use questbot_core::services::Services;
use teloxide::RequestError;
use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message, Update};
use tracing::{Instrument, debug, error, info_span, warn};
use uuid::Uuid;

pub use commands::Command;

/// Builds the update handler tree.
#[must_use]
pub fn schema() -> UpdateHandler<RequestError> {
    let commands = teloxide::filter_command::<Command, _>().endpoint(on_command);

    dptree::entry()
        .branch(
            Update::filter_message()
                .filter(|msg: Message| private_message(&msg))
                .branch(commands)
                .endpoint(on_message),
        )
        .branch(
            Update::filter_callback_query()
                .filter(|query: CallbackQuery| private_callback(&query))
                .endpoint(on_callback),
        )
}

/// The bot only talks in private chats.
fn private_message(msg: &Message) -> bool {
    msg.chat.is_private()
}

/// Presses on buttons of private-chat messages. Buttons on inline-mode
/// messages carry no chat and are dropped too.
fn private_callback(query: &CallbackQuery) -> bool {
    query
        .message
        .as_ref()
        .is_some_and(|message| message.chat().is_private())
}

async fn on_command(services: Services, msg: Message, command: Command) -> Result<(), RequestError> {
    let tg_user_id = msg.chat.id.0;
    handle("command", tg_user_id, commands::handle(&services, tg_user_id, command)).await;
    Ok(())
}

async fn on_message(services: Services, msg: Message) -> Result<(), RequestError> {
    let tg_user_id = msg.chat.id.0;
    let message_id = i64::from(msg.id.0);
    handle(
        "message",
        tg_user_id,
        messages::route_text(&services, tg_user_id, message_id, msg.text()),
    )
    .await;
    Ok(())
}

async fn on_callback(bot: Bot, services: Services, query: CallbackQuery) -> Result<(), RequestError> {
    if let Err(error) = bot.answer_callback_query(query.id.clone()).await {
        warn!(%error, "callback query not acknowledged");
    }
    let Ok(tg_user_id) = i64::try_from(query.from.id.0) else {
        warn!(user_id = query.from.id.0, "user id out of range");
        return Ok(());
    };
    let Some(data) = query.data.as_deref() else {
        debug!(tg_user_id, "callback without data");
        return Ok(());
    };
    handle(
        "callback",
        tg_user_id,
        callbacks::route_callback(&services, tg_user_id, data),
    )
    .await;
    Ok(())
}

async fn handle<F>(kind: &'static str, tg_user_id: i64, work: F)
where
    F: Future<Output = Result<(), DomainError>>,
{
    let span = info_span!("update", kind, tg_user_id, correlation_id = %Uuid::new_v4());
    async move {
        if let Err(error) = work.await {
            error!(%error, "failed to handle update");
        }
    }
    .instrument(span)
    .await;
}
