//! Handlers for `/start`, registration, the main menu, and the profile.
//!
//! Every handler takes the shared [`Services`] and the Telegram id of the
//! user; in a private chat that id is also the chat id.

use questbot_core::dialogue::ChatState;
use questbot_core::error::DomainError;
use questbot_core::messenger::Outgoing;
use questbot_core::services::Services;
use tracing::{info, instrument, warn};

use crate::domain::screens;
use crate::domain::username::Username;

/// `/start`: the main menu for registered users, an invitation to register
/// for everyone else.
///
/// # Errors
///
/// Returns `DomainError` if storage or delivery fails.
#[instrument(skip(services))]
pub async fn start(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    if services.users.user_exists(tg_user_id).await? {
        main_menu(services, tg_user_id).await
    } else {
        services
            .append_to_screen(tg_user_id, &[screens::registration_offer()])
            .await?;
        Ok(())
    }
}

/// Shows the main menu below the current screen.
///
/// # Errors
///
/// Returns `DomainError` if delivery fails.
#[instrument(skip(services))]
pub async fn main_menu(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    services
        .append_to_screen(tg_user_id, &[screens::main_menu()])
        .await?;
    Ok(())
}

/// Asks for a name and waits for it.
///
/// # Errors
///
/// Returns `DomainError` if delivery or the state store fails.
#[instrument(skip(services))]
pub async fn begin_registration(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    services
        .messenger
        .send(tg_user_id, &Outgoing::text(screens::ASK_USERNAME))
        .await?;
    services
        .states
        .set_state(tg_user_id, ChatState::AwaitingUsername)
        .await
}

/// Registers the user under the name they typed.
///
/// A blank name is answered with a hint and the prompt stays armed.
///
/// # Errors
///
/// Returns `DomainError` if storage, delivery, or the state store fails.
#[instrument(skip(services, text))]
pub async fn complete_registration(
    services: &Services,
    tg_user_id: i64,
    text: &str,
) -> Result<(), DomainError> {
    let Ok(username) = Username::parse(text) else {
        services
            .messenger
            .send(tg_user_id, &Outgoing::text(screens::EMPTY_USERNAME))
            .await?;
        return Ok(());
    };

    match services
        .users
        .register(tg_user_id, username.as_str(), services.clock.now())
        .await
    {
        Ok(()) => info!(tg_user_id, "user registered"),
        Err(DomainError::Validation(reason)) => {
            warn!(tg_user_id, %reason, "registration skipped");
        }
        Err(error) => return Err(error),
    }

    services
        .messenger
        .send(tg_user_id, &Outgoing::text(screens::REGISTRATION_COMPLETE))
        .await?;
    services.states.reset(tg_user_id).await?;
    main_menu(services, tg_user_id).await
}

/// Replaces the screen with the profile of the user. Unregistered users are
/// sent through `/start` instead.
///
/// # Errors
///
/// Returns `DomainError` if storage or delivery fails.
#[instrument(skip(services))]
pub async fn show_profile(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    let Some(user) = services.users.find_user(tg_user_id).await? else {
        return start(services, tg_user_id).await;
    };
    services
        .replace_screen(tg_user_id, &[screens::profile(&user.username)])
        .await?;
    Ok(())
}

/// Asks for a new name and waits for it.
///
/// # Errors
///
/// Returns `DomainError` if delivery or the state store fails.
#[instrument(skip(services))]
pub async fn begin_username_change(
    services: &Services,
    tg_user_id: i64,
) -> Result<(), DomainError> {
    services
        .messenger
        .send(tg_user_id, &Outgoing::text(screens::ASK_NEW_USERNAME))
        .await?;
    services
        .states
        .set_state(tg_user_id, ChatState::AwaitingNewUsername)
        .await
}

/// Renames the user and shows the updated profile.
///
/// # Errors
///
/// Returns `DomainError` if storage, delivery, or the state store fails.
#[instrument(skip(services, text))]
pub async fn complete_username_change(
    services: &Services,
    tg_user_id: i64,
    text: &str,
) -> Result<(), DomainError> {
    let Ok(username) = Username::parse(text) else {
        services
            .messenger
            .send(tg_user_id, &Outgoing::text(screens::EMPTY_USERNAME))
            .await?;
        return Ok(());
    };

    match services
        .users
        .change_username(tg_user_id, username.as_str())
        .await
    {
        Ok(()) => {}
        Err(DomainError::UserNotFound(_)) => {
            warn!(tg_user_id, "rename requested by an unregistered user");
            services.states.reset(tg_user_id).await?;
            return start(services, tg_user_id).await;
        }
        Err(error) => return Err(error),
    }

    services
        .replace_screen(tg_user_id, &[screens::renamed_profile(username.as_str())])
        .await?;
    services.states.reset(tg_user_id).await
}

/// Asks whether the account should really be deleted.
///
/// # Errors
///
/// Returns `DomainError` if delivery fails.
#[instrument(skip(services))]
pub async fn confirm_account_deletion(
    services: &Services,
    tg_user_id: i64,
) -> Result<(), DomainError> {
    services
        .append_to_screen(tg_user_id, &[screens::deletion_confirmation()])
        .await?;
    Ok(())
}

/// Deletes the account with all quest progress and starts over.
///
/// # Errors
///
/// Returns `DomainError` if storage, delivery, or the state store fails.
#[instrument(skip(services))]
pub async fn delete_account(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    services.clear_screen(tg_user_id).await?;
    services.users.delete_account(tg_user_id).await?;
    services.states.reset(tg_user_id).await?;
    info!(tg_user_id, "account deleted");

    services
        .messenger
        .send(tg_user_id, &Outgoing::text(screens::ACCOUNT_DELETED))
        .await?;
    start(services, tg_user_id).await
}
