//! Routing of commands, text, and callbacks against in-memory services.

use questbot_bot::routes::callbacks::route_callback;
use questbot_bot::routes::commands::{self, Command};
use questbot_bot::routes::messages::route_text;
use questbot_core::dialogue::{ChatState, StateStore};
use questbot_core::model::TimeLoopArtefacts;
use questbot_test_support::{Harness, InMemoryStore, registered_user, time_loop_quest};

const USER: i64 = 42;

fn newcomer() -> Harness {
    Harness::with_store(InMemoryStore::with_quests([time_loop_quest()]))
}

fn player() -> Harness {
    let harness = newcomer();
    harness.store.insert_user(registered_user(USER, "Алиса"));
    harness
}

#[tokio::test]
async fn test_start_offers_registration_to_newcomers() {
    // Arrange
    let harness = newcomer();

    // Act
    commands::handle(&harness.services(), USER, Command::Start)
        .await
        .unwrap();

    // Assert
    let last = harness.messenger.last().unwrap();
    assert_eq!(last.summary(), "Готовы зарегистрироваться?");
    assert_eq!(last.callbacks(), vec!["Registration"]);
}

#[tokio::test]
async fn test_start_drops_pending_prompt() {
    // Arrange
    let harness = player();
    harness
        .states
        .set_state(USER, ChatState::AwaitingSafeCode)
        .await
        .unwrap();

    // Act
    commands::start(&harness.services(), USER).await.unwrap();

    // Assert
    assert_eq!(harness.states.current(USER), ChatState::Idle);
    assert_eq!(
        harness.messenger.last().unwrap().summary(),
        "Выберите дальнейшее действие"
    );
}

#[tokio::test]
async fn test_registration_through_button_and_text() {
    // Arrange
    let harness = newcomer();
    let services = harness.services();

    // Act
    route_callback(&services, USER, "Registration").await.unwrap();
    let armed = harness.states.current(USER);
    route_text(&services, USER, 5, Some("  Боб ")).await.unwrap();

    // Assert
    assert_eq!(armed, ChatState::AwaitingUsername);
    assert_eq!(harness.store.user_record(USER).unwrap().username, "Боб");
    assert_eq!(harness.states.current(USER), ChatState::Idle);
    assert_eq!(
        &harness.messenger.summaries()[1..],
        &["Регистрация завершена!", "Выберите дальнейшее действие"]
    );
}

#[tokio::test]
async fn test_text_outside_prompt_is_ignored() {
    // Arrange
    let harness = player();

    // Act
    route_text(&harness.services(), USER, 5, Some("привет"))
        .await
        .unwrap();

    // Assert
    assert!(harness.messenger.sent().is_empty());
}

#[tokio::test]
async fn test_message_without_text_keeps_prompt() {
    // Arrange
    let harness = player();
    harness
        .states
        .set_state(USER, ChatState::AwaitingNewUsername)
        .await
        .unwrap();

    // Act
    route_text(&harness.services(), USER, 5, None).await.unwrap();

    // Assert
    assert!(harness.messenger.sent().is_empty());
    assert_eq!(harness.states.current(USER), ChatState::AwaitingNewUsername);
}

#[tokio::test]
async fn test_rename_through_profile() {
    // Arrange
    let harness = player();
    let services = harness.services();

    // Act
    route_callback(&services, USER, "change_username").await.unwrap();
    route_text(&services, USER, 5, Some("Кэрол")).await.unwrap();

    // Assert
    assert_eq!(harness.store.user_record(USER).unwrap().username, "Кэрол");
    assert_eq!(harness.states.current(USER), ChatState::Idle);
}

#[tokio::test]
async fn test_any_button_cancels_pending_prompt() {
    // Arrange
    let harness = player();
    harness
        .states
        .set_state(USER, ChatState::AwaitingRiddleAnswer { riddle: 1, attempt: 2 })
        .await
        .unwrap();

    // Act
    route_callback(&harness.services(), USER, "main_menu")
        .await
        .unwrap();

    // Assert
    assert_eq!(harness.states.current(USER), ChatState::Idle);
}

#[tokio::test]
async fn test_time_loop_card_opens_intro() {
    // Arrange
    let harness = player();

    // Act
    route_callback(&harness.services(), USER, "buy:2").await.unwrap();

    // Assert
    let sent = harness.messenger.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[2].callbacks(), vec!["startTimeLoop", "market"]);
}

#[tokio::test]
async fn test_other_quest_cards_fail_to_launch() {
    // Arrange
    let harness = player();

    // Act
    route_callback(&harness.services(), USER, "buy:7").await.unwrap();

    // Assert
    assert_eq!(
        harness.messenger.last().unwrap().summary(),
        "Ошибка запуска квеста"
    );
}

#[tokio::test]
async fn test_safe_code_typed_after_open_box() {
    // Arrange
    let harness = player();
    harness
        .store
        .insert_progress(USER, TimeLoopArtefacts::default());
    let services = harness.services();

    // Act
    route_callback(&services, USER, "open_box").await.unwrap();
    let armed = harness.states.current(USER);
    route_text(&services, USER, 9, Some("6142")).await.unwrap();

    // Assert
    assert_eq!(armed, ChatState::AwaitingSafeCode);
    assert!(harness.store.progress(USER).unwrap().key);
    assert_eq!(harness.states.current(USER), ChatState::Idle);
    assert!(harness.messenger.deleted().contains(&9));
}

#[tokio::test]
async fn test_riddle_answer_routed_with_attempt() {
    // Arrange
    let harness = player();
    harness
        .store
        .insert_progress(USER, TimeLoopArtefacts::default());
    let services = harness.services();

    // Act
    route_callback(&services, USER, "question1").await.unwrap();
    route_text(&services, USER, 9, Some("деньги")).await.unwrap();

    // Assert
    assert_eq!(
        harness.states.current(USER),
        ChatState::AwaitingRiddleAnswer { riddle: 0, attempt: 2 }
    );
    assert_eq!(
        harness.messenger.last().unwrap().summary(),
        "Не верно! Осталось 3 попыток"
    );
}

#[tokio::test]
async fn test_rating_counts_like() {
    // Arrange
    let harness = player();

    // Act
    route_callback(&harness.services(), USER, "final_like:2")
        .await
        .unwrap();

    // Assert
    assert_eq!(harness.store.quest_record(2).unwrap().likes, 1);
}

#[tokio::test]
async fn test_unknown_callback_does_nothing() {
    // Arrange
    let harness = player();

    // Act
    route_callback(&harness.services(), USER, "teleport")
        .await
        .unwrap();

    // Assert
    assert!(harness.messenger.sent().is_empty());
}

#[tokio::test]
async fn test_storage_failure_surfaces_as_error() {
    // Arrange
    let harness = player();

    // Act
    let result = route_callback(&harness.services_with_failing_storage(), USER, "market").await;

    // Assert
    assert!(result.is_err());
}
