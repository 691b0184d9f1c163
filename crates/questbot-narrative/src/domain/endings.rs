//! How the Time Loop can end.

use super::script::Frame;

/// A final screen of the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The uncle is rescued through the anomaly.
    Rescued,
    /// The wrong device exploded.
    Exploded,
    /// The Keeper's offer was declined.
    Declined,
    /// The Keeper was ignored.
    WentAlone,
    /// A riddle ran out of attempts.
    RiddlesFailed,
    /// The device was found without the key.
    NoKey,
}

impl Ending {
    /// Whether this is the happy ending.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Rescued)
    }

    /// Closing narration; the rescue letter is addressed by name.
    #[must_use]
    pub fn narration(self, username: &str) -> String {
        match self {
            Self::Rescued => format!(
                "Дядя:\nПривет, {username}, я рад, что ты смог разобраться во \
                 всем и спасти своего любимого дядю. Я очень тебе благодарен. \
                 Мне нужно тебе столько всего рассказать и показать, я надеюсь, \
                 что мы будем вместе путешествовать, изучать разные временные промежутки \
                 и погружаться в историю планеты."
            ),
            Self::Exploded => "К сожалению это оказался не тот прибор. \
                               При его запуске произошел взрыв и Вы погибли\n💀💀💀"
                .to_owned(),
            Self::Declined => "Вы отказались от возможности спасти Вашего дядю..\n\
                               Хранитель времени пропадает, и Вам больше \
                               не удается включить прибор заново."
                .to_owned(),
            Self::WentAlone => "Вы решили проигнорировать Хранителя Времени, \
                                и просто запустить прибор, к сожалению, прибор не сработал, \
                                без помощи Хранителя, вас засосало в прошлое к вашему дяде, и \
                                теперь вы оба находитесь в потерянном времени."
                .to_owned(),
            Self::RiddlesFailed => "Вам не удалось отгадать загадку с третьего раза и Хранитель молча исчез.\n\
                                    Прибор больше не включается, Вам не удалось спасти Вашего дядю.."
                .to_owned(),
            Self::NoKey => "К сожалению, Вы не смогли найти «Ключ Времени». \
                            Вы не можете запустить прибор. Вы не смогли спасти Вашего дядю."
                .to_owned(),
        }
    }

    /// Frames shown before the narration.
    #[must_use]
    pub fn preface(self) -> &'static [Frame] {
        match self {
            Self::RiddlesFailed => &[Frame::Text(super::riddles::OUT_OF_ATTEMPTS)],
            Self::NoKey => &super::script::DIARY_WITHOUT_KEY,
            _ => &[],
        }
    }
}

/// Rating request or congratulation after the happy ending. `completions`
/// counts earlier happy endings.
#[must_use]
pub fn success_text(username: &str, quest_name: &str, completions: i32) -> String {
    let run = completions + 1;
    if completions == 0 {
        format!("Поздравляю, {username}, Вы прошли квест «{quest_name}»\nОцените пожалуйста квест")
    } else if run == 2 {
        format!("Поздравляю, {username}, Вы прошли квест «{quest_name}» во {run} раз!")
    } else {
        format!("Поздравляю, {username}, Вы прошли квест «{quest_name}» в {run} раз!")
    }
}

/// Consolation after any other ending.
#[must_use]
pub fn failure_text(username: &str, quest_name: &str) -> String {
    format!(
        "{username}, к сожалению, Вам не удалось пройти квест «{quest_name}» на счастливую концовку\n\
         Вы всегда можете попробовать еще раз!\n"
    )
}
