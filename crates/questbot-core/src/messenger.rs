//! Outgoing chat messages and the transport that delivers them.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::DomainError;

/// An inline keyboard button that fires a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Label shown to the user.
    pub text: String,
    /// Callback data sent back when pressed.
    pub callback_data: String,
}

impl Button {
    /// Creates a callback button.
    #[must_use]
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Inline keyboard attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// One button per row, in order.
    #[must_use]
    pub fn column(buttons: impl IntoIterator<Item = Button>) -> Self {
        Self {
            rows: buttons.into_iter().map(|button| vec![button]).collect(),
        }
    }

    /// Button rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// Callback data of every button, top to bottom.
    pub fn callbacks(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flatten()
            .map(|button| button.callback_data.as_str())
    }
}

/// Body of an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text.
    Text(String),
    /// A photo uploaded from the local media directory.
    Photo(PathBuf),
}

/// A message the bot is about to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub content: Content,
    pub keyboard: Option<Keyboard>,
    /// Text is formatted with Telegram HTML.
    pub html: bool,
}

impl Outgoing {
    /// A plain text message.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Content::Text(text.into()),
            keyboard: None,
            html: false,
        }
    }

    /// A photo message.
    #[must_use]
    pub fn photo(path: impl Into<PathBuf>) -> Self {
        Self {
            content: Content::Photo(path.into()),
            keyboard: None,
            html: false,
        }
    }

    /// Attaches an inline keyboard.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// Marks the text as Telegram HTML.
    #[must_use]
    pub fn html(mut self) -> Self {
        self.html = true;
        self
    }

    /// The text body, if this is a text message.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Photo(_) => None,
        }
    }
}

/// Transport that talks to the user's private chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a message and returns its id.
    async fn send(&self, tg_user_id: i64, message: &Outgoing) -> Result<i64, DomainError>;

    /// Deletes a message previously sent to, or by, the user.
    async fn delete(&self, tg_user_id: i64, message_id: i64) -> Result<(), DomainError>;
}
