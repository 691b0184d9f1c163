//! [`Messenger`] implemented over the Telegram Bot API.

use async_trait::async_trait;
use questbot_core::error::DomainError;
use questbot_core::messenger::{Content, Keyboard, Messenger, Outgoing};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, ParseMode};
use teloxide::RequestError;

/// Sends and deletes messages in private chats. The chat id of a private
/// chat equals the user's Telegram id.
#[derive(Debug, Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    /// Wraps a bot handle.
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Converts a keyboard into Telegram's inline markup.
#[must_use]
pub fn inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows().iter().map(|row| {
        row.iter()
            .map(|button| {
                InlineKeyboardButton::callback(button.text.clone(), button.callback_data.clone())
            })
            .collect::<Vec<_>>()
    }))
}

fn delivery(error: RequestError) -> DomainError {
    DomainError::Delivery(error.to_string())
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, tg_user_id: i64, message: &Outgoing) -> Result<i64, DomainError> {
        let chat_id = ChatId(tg_user_id);
        let markup = message.keyboard.as_ref().map(inline_markup);

        let sent = match &message.content {
            Content::Text(text) => {
                let mut request = self.bot.send_message(chat_id, text.clone());
                if message.html {
                    request = request.parse_mode(ParseMode::Html);
                }
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await
            }
            Content::Photo(path) => {
                let mut request = self.bot.send_photo(chat_id, InputFile::file(path.clone()));
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await
            }
        }
        .map_err(delivery)?;

        Ok(i64::from(sent.id.0))
    }

    async fn delete(&self, tg_user_id: i64, message_id: i64) -> Result<(), DomainError> {
        let message_id = i32::try_from(message_id)
            .map_err(|_| DomainError::Delivery(format!("message id {message_id} out of range")))?;
        self.bot
            .delete_message(ChatId(tg_user_id), MessageId(message_id))
            .await
            .map_err(delivery)?;
        Ok(())
    }
}
