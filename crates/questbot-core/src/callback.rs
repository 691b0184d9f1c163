//! Callback data carried by inline keyboard buttons.
//!
//! Shell navigation (menus, profile, market, ratings) is decoded here. Quest
//! scripts own their identifiers; those arrive as [`Callback::Story`] and are
//! decoded by the quest crate.

use crate::model::QuestMark;

/// A decoded inline-button callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// `Registration`
    Registration,
    /// `main_menu`
    MainMenu,
    /// `my_profile`
    Profile,
    /// `change_username`
    ChangeUsername,
    /// `delete_account`
    DeleteAccount,
    /// `apply_delete_account`
    ConfirmDeleteAccount,
    /// `market`
    Market,
    /// `my_quests`
    MyQuests,
    /// `play:{quest_id}`
    PlayQuest(i64),
    /// `buy:{quest_id}`: a quest card was chosen in the market.
    ChooseQuest(i64),
    /// `final_like:{quest_id}` / `final_dislike:{quest_id}`
    RateQuest {
        /// The rated quest.
        quest_id: i64,
        /// The rating.
        mark: QuestMark,
    },
    /// Anything else; interpreted by the quest scripts.
    Story(String),
}

impl Callback {
    /// Decodes callback data. Never fails: unknown data becomes [`Callback::Story`].
    #[must_use]
    pub fn parse(data: &str) -> Self {
        match data {
            "Registration" => return Self::Registration,
            "main_menu" => return Self::MainMenu,
            "my_profile" => return Self::Profile,
            "change_username" => return Self::ChangeUsername,
            "delete_account" => return Self::DeleteAccount,
            "apply_delete_account" => return Self::ConfirmDeleteAccount,
            "market" => return Self::Market,
            "my_quests" => return Self::MyQuests,
            _ => {}
        }

        let parsed = data.split_once(':').and_then(|(prefix, id)| {
            let quest_id = id.parse::<i64>().ok()?;
            match prefix {
                "play" => Some(Self::PlayQuest(quest_id)),
                "buy" => Some(Self::ChooseQuest(quest_id)),
                "final_like" => Some(Self::RateQuest {
                    quest_id,
                    mark: QuestMark::Like,
                }),
                "final_dislike" => Some(Self::RateQuest {
                    quest_id,
                    mark: QuestMark::Dislike,
                }),
                _ => None,
            }
        });

        parsed.unwrap_or_else(|| Self::Story(data.to_owned()))
    }

    /// Encodes the callback as button data.
    #[must_use]
    pub fn data(&self) -> String {
        match self {
            Self::Registration => "Registration".to_owned(),
            Self::MainMenu => "main_menu".to_owned(),
            Self::Profile => "my_profile".to_owned(),
            Self::ChangeUsername => "change_username".to_owned(),
            Self::DeleteAccount => "delete_account".to_owned(),
            Self::ConfirmDeleteAccount => "apply_delete_account".to_owned(),
            Self::Market => "market".to_owned(),
            Self::MyQuests => "my_quests".to_owned(),
            Self::PlayQuest(id) => format!("play:{id}"),
            Self::ChooseQuest(id) => format!("buy:{id}"),
            Self::RateQuest {
                quest_id,
                mark: QuestMark::Like,
            } => format!("final_like:{quest_id}"),
            Self::RateQuest {
                quest_id,
                mark: QuestMark::Dislike,
            } => format!("final_dislike:{quest_id}"),
            Self::Story(data) => data.clone(),
        }
    }
}
