//! Messages shown by the accounts context.

use questbot_core::callback::Callback;
use questbot_core::messenger::{Button, Keyboard, Outgoing};

pub const READY_TO_REGISTER: &str = "Готовы зарегистрироваться?";
pub const ASK_USERNAME: &str = "Пожалуйста, введите Ваше имя: ";
pub const ASK_NEW_USERNAME: &str = "Пожалуйста, введите новое имя: ";
pub const EMPTY_USERNAME: &str = "Имя не может быть пустым. Попробуйте ещё раз: ";
pub const REGISTRATION_COMPLETE: &str = "Регистрация завершена!";
pub const MAIN_MENU: &str = "Выберите дальнейшее действие";
pub const CONFIRM_DELETION: &str =
    "Вы уверены, что хотите удалить аккаунт?\nВсе Ваши квесты не сохранятся";
pub const ACCOUNT_DELETED: &str = "Ваш аккаунт успешно удален!";

fn button(text: &str, callback: &Callback) -> Button {
    Button::new(text, callback.data())
}

/// Invitation to register.
#[must_use]
pub fn registration_offer() -> Outgoing {
    Outgoing::text(READY_TO_REGISTER).with_keyboard(Keyboard::column([button(
        "Зарегистрироваться",
        &Callback::Registration,
    )]))
}

/// The main menu.
#[must_use]
pub fn main_menu() -> Outgoing {
    Outgoing::text(MAIN_MENU).with_keyboard(Keyboard::column([
        button("Мой профиль", &Callback::Profile),
        button("Маркет квестов", &Callback::Market),
    ]))
}

/// Greeting of the profile screen.
#[must_use]
pub fn profile_text(username: &str) -> String {
    format!(
        "Здравствуйте, {username}!\nДобро пожаловать в Ваш профиль!\n\
         Тут пока что ничего нет, но, в будущем, мы обязательно добавим что-то новое."
    )
}

fn profile_keyboard() -> Keyboard {
    Keyboard::column([
        button("Изменить никнейм", &Callback::ChangeUsername),
        button("Удалить аккаунт", &Callback::DeleteAccount),
        button("Главное меню", &Callback::MainMenu),
    ])
}

/// The profile screen.
#[must_use]
pub fn profile(username: &str) -> Outgoing {
    Outgoing::text(profile_text(username)).with_keyboard(profile_keyboard())
}

/// The profile screen right after a rename.
#[must_use]
pub fn renamed_profile(username: &str) -> Outgoing {
    Outgoing::text(format!(
        "Так выглядит измененный профиль:\n\n{}",
        profile_text(username)
    ))
    .with_keyboard(profile_keyboard())
}

/// "Are you sure?" before deleting the account.
#[must_use]
pub fn deletion_confirmation() -> Outgoing {
    Outgoing::text(CONFIRM_DELETION).with_keyboard(Keyboard::column([
        button("Нет", &Callback::MainMenu),
        button("Да", &Callback::ConfirmDeleteAccount),
    ]))
}
