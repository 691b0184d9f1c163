//! Messages shown by the market context.

use questbot_core::callback::Callback;
use questbot_core::messenger::{Button, Keyboard, Outgoing};
use questbot_core::model::{Quest, QuestMark};

pub const QUEST_LAUNCH_FAILED: &str = "Ошибка запуска квеста";
pub const EMPTY_MARKET: &str = "В настоящее время тут пусто. \n<b>Coming soon</b>";
pub const NO_PURCHASES: &str =
    "У вас нет купленных квестов.\nХотите посмотреть каталог наших квестов?";
pub const BACK_TO_MENU: &str = "В главное меню";

const FEEDBACK_HINT: &str = "Если у Вас есть какие-то предложения или Вы нашли недочеты, \
                             напишите пожалуйста на профиль в описании бота.";

fn single(text: &str, callback: &Callback) -> Keyboard {
    Keyboard::column([Button::new(text, callback.data())])
}

/// Market card of a quest with a "choose" button.
#[must_use]
pub fn market_card(quest: &Quest) -> Outgoing {
    Outgoing::text(quest.card_text())
        .with_keyboard(single("Выбрать", &Callback::ChooseQuest(quest.id)))
}

/// Card of a purchased quest with a "play" button.
#[must_use]
pub fn owned_card(quest: &Quest) -> Outgoing {
    Outgoing::text(quest.card_text())
        .with_keyboard(single("Играть", &Callback::PlayQuest(quest.id)))
}

/// Closing message of a card list.
#[must_use]
pub fn back_to_menu() -> Outgoing {
    Outgoing::text(BACK_TO_MENU).with_keyboard(single("Главное меню", &Callback::MainMenu))
}

/// Placeholder for an empty catalogue.
#[must_use]
pub fn empty_market() -> Outgoing {
    Outgoing::text(EMPTY_MARKET)
        .html()
        .with_keyboard(single("Вернуться в меню", &Callback::MainMenu))
}

/// Offer to open the market when nothing was bought yet.
#[must_use]
pub fn no_purchases() -> Outgoing {
    Outgoing::text(NO_PURCHASES).with_keyboard(single("Маркет", &Callback::Market))
}

/// Thank-you note after a rating.
#[must_use]
pub fn rating_thanks(mark: QuestMark) -> Outgoing {
    let text = match mark {
        QuestMark::Like => format!("Спасибо за Вашу оценку.\n{FEEDBACK_HINT}"),
        QuestMark::Dislike => {
            format!("Спасибо за Вашу оценку!\nНам жаль, что Вам не понравилось..\n{FEEDBACK_HINT}")
        }
    };
    Outgoing::text(text).with_keyboard(Keyboard::column([
        Button::new("Маркет", Callback::Market.data()),
        Button::new("Главное меню", Callback::MainMenu.data()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dislike_thanks_is_apologetic() {
        let like = rating_thanks(QuestMark::Like);
        let dislike = rating_thanks(QuestMark::Dislike);

        assert!(!like.as_text().unwrap().contains("жаль"));
        assert!(dislike.as_text().unwrap().contains("Нам жаль"));
    }

    #[test]
    fn test_empty_market_is_html() {
        assert!(empty_market().html);
    }
}
