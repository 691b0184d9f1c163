//! The Time Keeper's three riddles.

use questbot_core::model::TimeLoopCounter;

use super::answer::normalize;

/// Answers allowed per riddle; the last wrong one ends the quest.
pub const MAX_ATTEMPTS: u8 = 4;
/// A hint follows the wrong answer given on this attempt.
pub const HINT_ATTEMPT: u8 = 3;

pub const OUT_OF_ATTEMPTS: &str = "Не верно! У Вас не осталось попыток";

/// A riddle with its accepted answers, already normalized.
#[derive(Debug)]
pub struct Riddle {
    pub question: &'static str,
    pub answers: &'static [&'static str],
    pub hint: &'static str,
    /// Persistent count of wrong answers.
    pub counter: TimeLoopCounter,
}

pub static RIDDLES: [Riddle; 3] = [
    Riddle {
        question: "Что течет, но не имеет ни источника, ни устья? \
                   Что можно потратить, но нельзя вернуть? \
                   Что все имеют, но никому не принадлежит?",
        answers: &["время"],
        hint: "Вот тебе подсказка:\nВлюбленные этого не наблюдают",
        counter: TimeLoopCounter::FirstQuestionTip,
    },
    Riddle {
        question: "Что есть и было, но никогда не настанет?",
        answers: &["вчера", "вчерашнийдень"],
        hint: "Вот тебе подсказка:\nУ каждого человека сегодня, этот момент уже прошел.",
        counter: TimeLoopCounter::SecondQuestionTip,
    },
    Riddle {
        question: "Что является ключом, к пониманию всего вокруг, что нас окружает?",
        answers: &["сознание", "осознание"],
        hint: "Вот тебе подсказка:\nВнутри каждого из нас, это есть, в основном, это в голове.",
        counter: TimeLoopCounter::ThirdQuestionTip,
    },
];

impl Riddle {
    /// Looks a riddle up by its zero-based index.
    #[must_use]
    pub fn get(index: u8) -> Option<&'static Self> {
        RIDDLES.get(usize::from(index))
    }

    /// Whether `answer` solves the riddle.
    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = normalize(answer);
        self.answers.contains(&answer.as_str())
    }
}

/// What happens after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiddleOutcome {
    /// Right answer; `next` is the following riddle, `None` after the last.
    Solved { next: Option<u8> },
    /// Wrong answer with attempts left.
    Wrong {
        remaining: u8,
        hint: Option<&'static str>,
    },
    /// Wrong answer on the last attempt.
    Exhausted,
}

/// Judges `answer` given on the one-based `attempt` at riddle `index`.
///
/// Returns `None` for an unknown riddle.
#[must_use]
pub fn evaluate(index: u8, attempt: u8, answer: &str) -> Option<RiddleOutcome> {
    let riddle = Riddle::get(index)?;
    let outcome = if riddle.accepts(answer) {
        let next = index + 1;
        RiddleOutcome::Solved {
            next: Riddle::get(next).map(|_| next),
        }
    } else if attempt >= MAX_ATTEMPTS {
        RiddleOutcome::Exhausted
    } else {
        RiddleOutcome::Wrong {
            remaining: MAX_ATTEMPTS - attempt,
            hint: (attempt == HINT_ATTEMPT).then_some(riddle.hint),
        }
    };
    Some(outcome)
}

/// Reply to a wrong answer.
#[must_use]
pub fn attempts_left_text(remaining: u8) -> String {
    format!("Не верно! Осталось {remaining} попыток")
}
