//! Query handlers for the market context.
//!
//! These handlers only read the catalogue and render it as a new screen.

use questbot_core::error::DomainError;
use questbot_core::messenger::Outgoing;
use questbot_core::services::Services;
use tracing::{debug, instrument, warn};

use crate::domain::screens;

/// Replaces the screen with every quest of the catalogue.
///
/// # Errors
///
/// Returns `DomainError` if storage or delivery fails.
#[instrument(skip(services))]
pub async fn show_market(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    let quests = services.quests.list_quests().await?;
    debug!(count = quests.len(), "listing market");

    let screen: Vec<Outgoing> = if quests.is_empty() {
        vec![screens::empty_market()]
    } else {
        quests
            .iter()
            .map(screens::market_card)
            .chain(std::iter::once(screens::back_to_menu()))
            .collect()
    };
    services.replace_screen(tg_user_id, &screen).await?;
    Ok(())
}

/// Replaces the screen with the quests the user has bought.
///
/// # Errors
///
/// Returns `DomainError` if storage or delivery fails.
#[instrument(skip(services))]
pub async fn show_my_quests(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    let mut cards = Vec::new();
    for quest_id in services.users.paid_quest_ids(tg_user_id).await? {
        match services.quests.find_quest(quest_id).await? {
            Some(quest) => cards.push(screens::owned_card(&quest)),
            None => warn!(quest_id, "purchased quest is missing from the catalogue"),
        }
    }

    if cards.is_empty() {
        cards.push(screens::no_purchases());
    } else {
        cards.push(screens::back_to_menu());
    }
    services.replace_screen(tg_user_id, &cards).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use questbot_core::model::Quest;
    use questbot_test_support::{Harness, InMemoryStore, registered_user, time_loop_quest};

    use super::*;

    const USER: i64 = 42;

    fn paid_quest() -> Quest {
        Quest {
            id: 3,
            name: "Маяк".to_owned(),
            description: "Ночь на маяке".to_owned(),
            is_free: false,
            likes: 5,
            dislikes: 1,
        }
    }

    #[tokio::test]
    async fn test_show_market_lists_every_quest_then_menu() {
        // Arrange
        let harness = Harness::with_store(InMemoryStore::with_quests([
            time_loop_quest(),
            paid_quest(),
        ]));

        // Act
        show_market(&harness.services(), USER).await.unwrap();

        // Assert
        let sent = harness.messenger.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].summary().starts_with("Название: «Временная петля»"));
        assert_eq!(sent[0].callbacks(), vec!["buy:2"]);
        assert!(sent[1].summary().ends_with("5❤️   1🙁\n$"));
        assert_eq!(sent[1].callbacks(), vec!["buy:3"]);
        assert_eq!(sent[2].summary(), "В главное меню");
        let ids: Vec<i64> = sent.iter().map(|message| message.id).collect();
        assert_eq!(harness.store.tracked_ids(USER), ids);
    }

    #[tokio::test]
    async fn test_show_market_replaces_previous_screen() {
        // Arrange
        let harness = Harness::with_store(InMemoryStore::with_quests([time_loop_quest()]));
        let services = harness.services();
        show_market(&services, USER).await.unwrap();
        let first_screen: Vec<i64> = harness.store.tracked_ids(USER);

        // Act
        show_market(&services, USER).await.unwrap();

        // Assert
        assert_eq!(harness.messenger.deleted(), first_screen);
        assert_eq!(harness.store.tracked_ids(USER).len(), 2);
    }

    #[tokio::test]
    async fn test_empty_market_is_coming_soon() {
        // Arrange
        let harness = Harness::default();

        // Act
        show_market(&harness.services(), USER).await.unwrap();

        // Assert
        let sent = harness.messenger.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].message.html);
        assert!(sent[0].summary().contains("<b>Coming soon</b>"));
        assert_eq!(sent[0].callbacks(), vec!["main_menu"]);
    }

    #[tokio::test]
    async fn test_my_quests_shows_purchases_with_play_buttons() {
        // Arrange
        let store = InMemoryStore::with_quests([time_loop_quest(), paid_quest()]);
        let mut user = registered_user(USER, "Алиса");
        user.paid_quest_ids = vec![3, 99];
        store.insert_user(user);
        let harness = Harness::with_store(store);

        // Act
        show_my_quests(&harness.services(), USER).await.unwrap();

        // Assert
        let sent = harness.messenger.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].callbacks(), vec!["play:3"]);
        assert_eq!(sent[1].summary(), "В главное меню");
    }

    #[tokio::test]
    async fn test_my_quests_without_purchases_offers_market() {
        // Arrange
        let store = InMemoryStore::new();
        store.insert_user(registered_user(USER, "Алиса"));
        let harness = Harness::with_store(store);

        // Act
        show_my_quests(&harness.services(), USER).await.unwrap();

        // Assert
        let last = harness.messenger.last().unwrap();
        assert_eq!(last.summary(), screens::NO_PURCHASES);
        assert_eq!(last.callbacks(), vec!["market"]);
    }
}
