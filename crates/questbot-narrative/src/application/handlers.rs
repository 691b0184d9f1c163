//! Handlers that walk a user through the Time Loop.
//!
//! Every step replaces the screen with its scene, except the riddles, which
//! are appended so the Keeper's conversation stays visible.

use questbot_core::callback::Callback;
use questbot_core::dialogue::ChatState;
use questbot_core::error::DomainError;
use questbot_core::messenger::{Button, Keyboard, Outgoing};
use questbot_core::model::{Artefact, QuestMark, TimeLoopArtefacts, TimeLoopCounter};
use questbot_core::services::Services;
use tracing::{debug, info, instrument, warn};

use crate::TIME_LOOP_QUEST_ID;
use crate::domain::endings::{self, Ending};
use crate::domain::riddles::{self, Riddle, RiddleOutcome};
use crate::domain::safe::{self, SafeOutcome};
use crate::domain::script::{self, Choice, Frame, Scene};
use crate::domain::step::TimeLoopStep;

fn keyboard(choices: &[Choice]) -> Keyboard {
    Keyboard::column(
        choices
            .iter()
            .map(|(label, step)| Button::new(*label, step.as_str())),
    )
}

fn render(services: &Services, frames: &[Frame], choices: &[Choice]) -> Vec<Outgoing> {
    let mut messages: Vec<Outgoing> = frames
        .iter()
        .map(|frame| match frame {
            Frame::Text(text) => Outgoing::text(*text),
            Frame::Photo(file_name) => Outgoing::photo(services.media(file_name)),
        })
        .collect();
    if !choices.is_empty() {
        if let Some(last) = messages.pop() {
            messages.push(last.with_keyboard(keyboard(choices)));
        }
    }
    messages
}

async fn show(services: &Services, tg_user_id: i64, scene: Scene) -> Result<(), DomainError> {
    let messages = render(services, scene.frames, scene.choices);
    services.replace_screen(tg_user_id, &messages).await?;
    Ok(())
}

/// Progress of the user, creating a fresh row when there is none yet.
async fn progress(services: &Services, tg_user_id: i64) -> Result<TimeLoopArtefacts, DomainError> {
    if let Some(artefacts) = services.time_loop.artefacts(tg_user_id).await? {
        return Ok(artefacts);
    }
    services.time_loop.init_artefacts(tg_user_id).await?;
    Ok(services
        .time_loop
        .artefacts(tg_user_id)
        .await?
        .unwrap_or_default())
}

/// Replaces the screen with the quest legend and a "play" button.
///
/// # Errors
///
/// Returns `DomainError` if delivery or the message log fails.
#[instrument(skip(services))]
pub async fn show_intro(services: &Services, tg_user_id: i64) -> Result<(), DomainError> {
    let [first, second, third] = script::LEGEND;
    let messages = [
        Outgoing::text(first),
        Outgoing::text(second),
        Outgoing::text(third).with_keyboard(Keyboard::column([
            Button::new(script::PLAY_LABEL, TimeLoopStep::Start.as_str()),
            Button::new(script::OTHER_QUESTS_LABEL, Callback::Market.data()),
        ])),
    ];
    services.replace_screen(tg_user_id, &messages).await?;
    Ok(())
}

/// Shows the scene of `step`, applying its effects on the user's progress.
///
/// # Errors
///
/// Returns `DomainError` if storage, delivery, or the state store fails.
#[instrument(skip(services))]
pub async fn handle_step(
    services: &Services,
    tg_user_id: i64,
    step: TimeLoopStep,
) -> Result<(), DomainError> {
    match step {
        TimeLoopStep::Start => {
            services.time_loop.init_artefacts(tg_user_id).await?;
            show(services, tg_user_id, script::LETTER_ON_DESK).await
        }
        TimeLoopStep::OtherClues3 => {
            let scene = if progress(services, tg_user_id).await?.safe {
                script::BOX_EMPTY
            } else {
                script::BOX_LOCKED
            };
            show(services, tg_user_id, scene).await
        }
        TimeLoopStep::OpenBox => {
            show(services, tg_user_id, script::ENTER_CODE).await?;
            services
                .states
                .set_state(tg_user_id, ChatState::AwaitingSafeCode)
                .await
        }
        TimeLoopStep::TakePuppy => {
            services.time_loop.init_artefacts(tg_user_id).await?;
            services
                .time_loop
                .set_artefact(tg_user_id, Artefact::Dog, true)
                .await?;
            show(services, tg_user_id, script::PUPPY_TAKEN).await
        }
        TimeLoopStep::UseDiary => {
            if progress(services, tg_user_id).await?.key {
                show(services, tg_user_id, script::DEVICE_FOUND).await
            } else {
                finish(services, tg_user_id, Ending::NoKey).await
            }
        }
        TimeLoopStep::Question1 => ask_riddle(services, tg_user_id, 0, &[]).await,
        TimeLoopStep::UseDevice => finish(services, tg_user_id, Ending::Exploded).await,
        TimeLoopStep::Anomaly => finish(services, tg_user_id, Ending::Rescued).await,
        TimeLoopStep::Rejection => finish(services, tg_user_id, Ending::Declined).await,
        TimeLoopStep::MyselfUncle => finish(services, tg_user_id, Ending::WentAlone).await,
        TimeLoopStep::Again => show_intro(services, tg_user_id).await,
        other => match script::fixed_scene(other) {
            Some(scene) => show(services, tg_user_id, scene).await,
            None => {
                warn!(step = other.as_str(), "step has no scene");
                Ok(())
            }
        },
    }
}

async fn ask_riddle(
    services: &Services,
    tg_user_id: i64,
    index: u8,
    preface: &[Outgoing],
) -> Result<(), DomainError> {
    let Some(riddle) = Riddle::get(index) else {
        return Err(DomainError::Validation(format!("no riddle {index}")));
    };
    let mut messages = preface.to_vec();
    messages.push(Outgoing::text(riddle.question));
    services.append_to_screen(tg_user_id, &messages).await?;
    services
        .states
        .set_state(
            tg_user_id,
            ChatState::AwaitingRiddleAnswer {
                riddle: index,
                attempt: 1,
            },
        )
        .await
}

/// Checks a code typed for the locked box.
///
/// The user's message is tracked so it disappears with the screen.
///
/// # Errors
///
/// Returns `DomainError` if storage, delivery, or the state store fails.
#[instrument(skip(services, text))]
pub async fn check_safe_code(
    services: &Services,
    tg_user_id: i64,
    message_id: i64,
    text: &str,
) -> Result<(), DomainError> {
    services.track_incoming(tg_user_id, message_id).await?;
    let progress = progress(services, tg_user_id).await?;

    match safe::check(text, progress.safe_tip) {
        SafeOutcome::Opened => {
            info!(tg_user_id, "safe opened");
            services
                .time_loop
                .set_artefact(tg_user_id, Artefact::Safe, true)
                .await?;
            services
                .time_loop
                .set_artefact(tg_user_id, Artefact::Key, true)
                .await?;
            services.states.reset(tg_user_id).await?;
            show(services, tg_user_id, script::KEY_FOUND).await
        }
        SafeOutcome::Wrong { offer_hint } => {
            let mut choices = vec![Button::new(
                script::BACK_LABEL,
                TimeLoopStep::OtherClues3.as_str(),
            )];
            if offer_hint {
                choices.push(Button::new(
                    script::HINT_LABEL,
                    TimeLoopStep::SafeTip.as_str(),
                ));
            } else {
                services
                    .time_loop
                    .increment_counter(tg_user_id, TimeLoopCounter::SafeTip)
                    .await?;
            }
            debug!(tg_user_id, offer_hint, "wrong safe code");
            services
                .append_to_screen(
                    tg_user_id,
                    &[Outgoing::text(script::WRONG_CODE).with_keyboard(Keyboard::column(choices))],
                )
                .await?;
            Ok(())
        }
    }
}

/// Judges an answer to the Keeper's riddle `riddle` given on `attempt`.
///
/// # Errors
///
/// Returns `DomainError` if storage, delivery, or the state store fails.
#[instrument(skip(services, text))]
pub async fn answer_riddle(
    services: &Services,
    tg_user_id: i64,
    message_id: i64,
    riddle: u8,
    attempt: u8,
    text: &str,
) -> Result<(), DomainError> {
    services.track_incoming(tg_user_id, message_id).await?;
    let Some(outcome) = riddles::evaluate(riddle, attempt, text) else {
        warn!(riddle, "answer to an unknown riddle");
        return services.states.reset(tg_user_id).await;
    };
    debug!(?outcome, "riddle answered");

    match outcome {
        RiddleOutcome::Solved { next: Some(next) } => {
            ask_riddle(services, tg_user_id, next, &[Outgoing::text(script::CORRECT)]).await
        }
        RiddleOutcome::Solved { next: None } => {
            services.states.reset(tg_user_id).await?;
            let mut messages = vec![Outgoing::text(script::CORRECT)];
            messages.extend(render(
                services,
                script::KEEPER_ALLOWS.frames,
                script::KEEPER_ALLOWS.choices,
            ));
            services.append_to_screen(tg_user_id, &messages).await?;
            Ok(())
        }
        RiddleOutcome::Wrong { remaining, hint } => {
            if let Some(current) = Riddle::get(riddle) {
                services
                    .time_loop
                    .increment_counter(tg_user_id, current.counter)
                    .await?;
            }
            let mut messages = vec![Outgoing::text(riddles::attempts_left_text(remaining))];
            messages.extend(hint.map(Outgoing::text));
            services.append_to_screen(tg_user_id, &messages).await?;
            services
                .states
                .set_state(
                    tg_user_id,
                    ChatState::AwaitingRiddleAnswer {
                        riddle,
                        attempt: attempt + 1,
                    },
                )
                .await
        }
        RiddleOutcome::Exhausted => {
            services.states.reset(tg_user_id).await?;
            finish(services, tg_user_id, Ending::RiddlesFailed).await
        }
    }
}

/// Shows an ending, resets the user's progress, and appends the closing
/// screen: a rating request or congratulation after the happy ending, an
/// offer to replay after any other.
async fn finish(services: &Services, tg_user_id: i64, ending: Ending) -> Result<(), DomainError> {
    let user = services
        .users
        .find_user(tg_user_id)
        .await?
        .ok_or(DomainError::UserNotFound(tg_user_id))?;
    let quest = services
        .quests
        .find_quest(TIME_LOOP_QUEST_ID)
        .await?
        .ok_or(DomainError::QuestNotFound(TIME_LOOP_QUEST_ID))?;
    let completions = progress(services, tg_user_id).await?.rate_count;

    services.time_loop.reset_artefacts(tg_user_id).await?;
    let mut screen = render(services, ending.preface(), &[]);
    screen.push(Outgoing::text(ending.narration(&user.username)));
    services.replace_screen(tg_user_id, &screen).await?;

    let closing = if ending.is_success() {
        services
            .time_loop
            .increment_counter(tg_user_id, TimeLoopCounter::RateCount)
            .await?;
        let text = endings::success_text(&user.username, &quest.name, completions);
        let buttons = if completions == 0 {
            vec![
                Button::new(
                    "   ❤️   ",
                    Callback::RateQuest {
                        quest_id: quest.id,
                        mark: QuestMark::Like,
                    }
                    .data(),
                ),
                Button::new(
                    "   🙁   ",
                    Callback::RateQuest {
                        quest_id: quest.id,
                        mark: QuestMark::Dislike,
                    }
                    .data(),
                ),
            ]
        } else {
            vec![Button::new("Главное меню", Callback::MainMenu.data())]
        };
        Outgoing::text(text).with_keyboard(Keyboard::column(buttons))
    } else {
        Outgoing::text(endings::failure_text(&user.username, &quest.name)).with_keyboard(
            Keyboard::column([
                Button::new("Пройти заново", TimeLoopStep::Again.as_str()),
                Button::new("Маркет", Callback::Market.data()),
                Button::new("Главное меню", Callback::MainMenu.data()),
            ]),
        )
    };
    services.append_to_screen(tg_user_id, &[closing]).await?;
    info!(tg_user_id, ?ending, "time loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use questbot_core::dialogue::StateStore;
    use questbot_core::messenger::Content;
    use questbot_test_support::{
        FailingMessenger, Harness, InMemoryStore, registered_user, time_loop_quest,
    };

    use super::*;

    const USER: i64 = 42;

    fn player() -> Harness {
        let store = InMemoryStore::with_quests([time_loop_quest()]);
        store.insert_user(registered_user(USER, "Алиса"));
        Harness::with_store(store)
    }

    fn with_progress(artefacts: TimeLoopArtefacts) -> Harness {
        let harness = player();
        harness.store.insert_progress(USER, artefacts);
        harness
    }

    #[tokio::test]
    async fn test_intro_shows_legend_with_play_button() {
        // Arrange
        let harness = player();

        // Act
        show_intro(&harness.services(), USER).await.unwrap();

        // Assert
        let sent = harness.messenger.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].summary().starts_with("Вы - молодой журналист"));
        assert_eq!(sent[2].callbacks(), vec!["startTimeLoop", "market"]);
        assert_eq!(harness.store.tracked_ids(USER).len(), 3);
    }

    #[tokio::test]
    async fn test_start_creates_progress_and_shows_letter() {
        // Arrange
        let harness = player();

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::Start)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            harness.store.progress(USER),
            Some(TimeLoopArtefacts::default())
        );
        let last = harness.messenger.last().unwrap();
        assert_eq!(last.summary(), "Вы видете письмо на столе");
        assert_eq!(last.callbacks(), vec!["open_letter", "other_clues_1"]);
    }

    #[tokio::test]
    async fn test_photo_steps_load_from_media_dir() {
        // Arrange
        let harness = player();

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::OpenLetter)
            .await
            .unwrap();

        // Assert
        let last = harness.messenger.last().unwrap();
        assert_eq!(
            last.message.content,
            Content::Photo(PathBuf::from("uploads/First_letter.JPG"))
        );
        assert_eq!(last.callbacks(), vec!["other_clues_1"]);
    }

    #[tokio::test]
    async fn test_scene_replaces_previous_one() {
        // Arrange
        let harness = player();
        let services = harness.services();
        handle_step(&services, USER, TimeLoopStep::OtherClues1)
            .await
            .unwrap();
        let previous = harness.messenger.last().unwrap().id;

        // Act
        handle_step(&services, USER, TimeLoopStep::OtherClues2)
            .await
            .unwrap();

        // Assert
        assert_eq!(harness.messenger.deleted(), vec![previous]);
        assert_eq!(
            harness.store.tracked_ids(USER),
            vec![harness.messenger.last().unwrap().id]
        );
    }

    #[tokio::test]
    async fn test_cupboard_depends_on_opened_safe() {
        // Arrange
        let locked = player();
        let opened = with_progress(TimeLoopArtefacts {
            safe: true,
            ..TimeLoopArtefacts::default()
        });

        // Act
        handle_step(&locked.services(), USER, TimeLoopStep::OtherClues3)
            .await
            .unwrap();
        handle_step(&opened.services(), USER, TimeLoopStep::OtherClues3)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            locked.messenger.last().unwrap().callbacks(),
            vec!["open_box", "other_clues_4", "other_clues_2"]
        );
        assert_eq!(
            opened.messenger.last().unwrap().callbacks(),
            vec!["other_clues_4", "other_clues_2"]
        );
    }

    #[tokio::test]
    async fn test_open_box_waits_for_code() {
        // Arrange
        let harness = player();

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::OpenBox)
            .await
            .unwrap();

        // Assert
        assert_eq!(harness.states.current(USER), ChatState::AwaitingSafeCode);
        assert_eq!(harness.messenger.last().unwrap().summary(), "Введите пароль:");
    }

    #[tokio::test]
    async fn test_wrong_code_counts_attempt_and_tracks_answer() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts::default());
        harness
            .states
            .set_state(USER, ChatState::AwaitingSafeCode)
            .await
            .unwrap();

        // Act
        check_safe_code(&harness.services(), USER, 77, "1234")
            .await
            .unwrap();

        // Assert
        assert_eq!(harness.store.progress(USER).unwrap().safe_tip, 1);
        let last = harness.messenger.last().unwrap();
        assert_eq!(last.summary(), script::WRONG_CODE);
        assert_eq!(last.callbacks(), vec!["other_clues_3"]);
        assert_eq!(harness.store.tracked_ids(USER), vec![77, last.id]);
        assert_eq!(harness.states.current(USER), ChatState::AwaitingSafeCode);
    }

    #[tokio::test]
    async fn test_hint_offered_after_three_wrong_codes() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts {
            safe_tip: 3,
            ..TimeLoopArtefacts::default()
        });

        // Act
        check_safe_code(&harness.services(), USER, 77, "0000")
            .await
            .unwrap();

        // Assert
        assert_eq!(harness.store.progress(USER).unwrap().safe_tip, 3);
        assert_eq!(
            harness.messenger.last().unwrap().callbacks(),
            vec!["other_clues_3", "safe_tip"]
        );
    }

    #[tokio::test]
    async fn test_right_code_yields_key() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts::default());
        harness
            .states
            .set_state(USER, ChatState::AwaitingSafeCode)
            .await
            .unwrap();

        // Act
        check_safe_code(&harness.services(), USER, 77, " 6142 ")
            .await
            .unwrap();

        // Assert
        let progress = harness.store.progress(USER).unwrap();
        assert!(progress.safe && progress.key);
        assert_eq!(harness.states.current(USER), ChatState::Idle);
        assert_eq!(
            harness.messenger.summaries(),
            vec![
                "Успешно",
                "Вы нашли артефакт",
                "[photo Key.png]",
                "Это «Ключ Времени», которые поможет вам воспользоваться временной аномалией",
            ]
        );
        assert_eq!(harness.messenger.deleted(), vec![77]);
    }

    #[tokio::test]
    async fn test_take_puppy_sets_dog() {
        // Arrange
        let harness = player();

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::TakePuppy)
            .await
            .unwrap();

        // Assert
        assert!(harness.store.progress(USER).unwrap().dog);
        assert_eq!(
            harness.messenger.summaries(),
            vec![
                "[photo Kopernik.png]",
                "Это оказалась очень умная и добрая собака. Теперь у тебя появился новый пушистый друг",
            ]
        );
    }

    #[tokio::test]
    async fn test_diary_with_key_leads_to_keeper() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts {
            key: true,
            ..TimeLoopArtefacts::default()
        });

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::UseDiary)
            .await
            .unwrap();

        // Assert
        let sent = harness.messenger.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].summary(), "[photo Location_device.JPG]");
        assert_eq!(sent[2].callbacks(), vec!["talkTS", "myselfUncle"]);
    }

    #[tokio::test]
    async fn test_diary_without_key_fails_quest() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts {
            dog: true,
            safe_tip: 2,
            rate_count: 1,
            ..TimeLoopArtefacts::default()
        });

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::UseDiary)
            .await
            .unwrap();

        // Assert
        let progress = harness.store.progress(USER).unwrap();
        assert_eq!(
            progress,
            TimeLoopArtefacts {
                rate_count: 1,
                ..TimeLoopArtefacts::default()
            }
        );
        let sent = harness.messenger.sent();
        assert_eq!(sent.len(), 4);
        assert!(sent[2].summary().contains("Вы не смогли найти «Ключ Времени»"));
        assert!(
            sent[3]
                .summary()
                .starts_with("Алиса, к сожалению, Вам не удалось пройти квест «Временная петля»")
        );
        assert_eq!(
            sent[3].callbacks(),
            vec!["again_time_loop", "market", "main_menu"]
        );
        let ids: Vec<i64> = sent.iter().map(|message| message.id).collect();
        assert_eq!(harness.store.tracked_ids(USER), ids);
    }

    #[tokio::test]
    async fn test_riddles_solved_in_turn() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts::default());
        let services = harness.services();
        handle_step(&services, USER, TimeLoopStep::Question1)
            .await
            .unwrap();

        // Act
        answer_riddle(&services, USER, 1, 0, 1, "Время").await.unwrap();
        let second = harness.states.current(USER);
        answer_riddle(&services, USER, 2, 1, 1, "вчерашний день!")
            .await
            .unwrap();
        let third = harness.states.current(USER);
        answer_riddle(&services, USER, 3, 2, 1, "Сознание").await.unwrap();

        // Assert
        assert_eq!(
            second,
            ChatState::AwaitingRiddleAnswer {
                riddle: 1,
                attempt: 1
            }
        );
        assert_eq!(
            third,
            ChatState::AwaitingRiddleAnswer {
                riddle: 2,
                attempt: 1
            }
        );
        assert_eq!(harness.states.current(USER), ChatState::Idle);
        assert_eq!(
            harness.messenger.last().unwrap().callbacks(),
            vec!["anomaly", "rejection"]
        );
        assert!(harness.messenger.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_riddle_answers_then_failure() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts::default());
        let services = harness.services();
        handle_step(&services, USER, TimeLoopStep::Question1)
            .await
            .unwrap();

        // Act
        for (message_id, attempt) in [(1, 1), (2, 2), (3, 3)] {
            answer_riddle(&services, USER, message_id, 0, attempt, "деньги")
                .await
                .unwrap();
        }
        let before_last = harness.messenger.summaries();
        let counted = harness.store.progress(USER).unwrap().first_question_tip;
        answer_riddle(&services, USER, 4, 0, 4, "деньги")
            .await
            .unwrap();

        // Assert
        assert_eq!(counted, 3);
        assert_eq!(
            &before_last[1..],
            &[
                "Не верно! Осталось 3 попыток",
                "Не верно! Осталось 2 попыток",
                "Не верно! Осталось 1 попыток",
                riddles::RIDDLES[0].hint,
            ]
        );
        assert_eq!(harness.states.current(USER), ChatState::Idle);
        let last = harness.messenger.last().unwrap();
        assert_eq!(
            last.callbacks(),
            vec!["again_time_loop", "market", "main_menu"]
        );
        assert_eq!(harness.store.progress(USER).unwrap().first_question_tip, 0);
    }

    #[tokio::test]
    async fn test_first_rescue_asks_for_rating() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts {
            key: true,
            safe: true,
            ..TimeLoopArtefacts::default()
        });

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::Anomaly)
            .await
            .unwrap();

        // Assert
        let sent = harness.messenger.sent();
        assert!(sent[0].summary().starts_with("Дядя:\nПривет, Алиса,"));
        assert_eq!(sent[1].callbacks(), vec!["final_like:2", "final_dislike:2"]);
        let progress = harness.store.progress(USER).unwrap();
        assert!(!progress.key);
        assert_eq!(progress.rate_count, 1);
    }

    #[tokio::test]
    async fn test_second_rescue_counts_runs() {
        // Arrange
        let harness = with_progress(TimeLoopArtefacts {
            rate_count: 1,
            ..TimeLoopArtefacts::default()
        });

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::Anomaly)
            .await
            .unwrap();

        // Assert
        let last = harness.messenger.last().unwrap();
        assert_eq!(
            last.summary(),
            "Поздравляю, Алиса, Вы прошли квест «Временная петля» во 2 раз!"
        );
        assert_eq!(last.callbacks(), vec!["main_menu"]);
        assert_eq!(harness.store.progress(USER).unwrap().rate_count, 2);
    }

    #[tokio::test]
    async fn test_failure_endings_do_not_count_runs() {
        for step in [
            TimeLoopStep::UseDevice,
            TimeLoopStep::Rejection,
            TimeLoopStep::MyselfUncle,
        ] {
            // Arrange
            let harness = with_progress(TimeLoopArtefacts::default());

            // Act
            handle_step(&harness.services(), USER, step).await.unwrap();

            // Assert
            assert_eq!(harness.store.progress(USER).unwrap().rate_count, 0);
            assert_eq!(
                harness.messenger.last().unwrap().callbacks()[0],
                "again_time_loop"
            );
        }
    }

    #[tokio::test]
    async fn test_replay_shows_intro_again() {
        // Arrange
        let harness = player();

        // Act
        handle_step(&harness.services(), USER, TimeLoopStep::Again)
            .await
            .unwrap();

        // Assert
        assert_eq!(harness.messenger.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_undelivered_prompt_leaves_state_untouched() {
        // Arrange
        let harness = player();
        let services = Services {
            messenger: Arc::new(FailingMessenger),
            ..harness.services()
        };

        // Act
        let result = handle_step(&services, USER, TimeLoopStep::OpenBox).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Delivery(_))));
        assert_eq!(harness.states.current(USER), ChatState::Idle);
        assert!(harness.store.tracked_ids(USER).is_empty());
    }
}
