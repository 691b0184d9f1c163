//! Callback identifiers of the Time Loop script.

/// A point of the story reachable by an inline button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeLoopStep {
    Start,
    OpenLetter,
    OtherClues1,
    ReadNotes,
    OtherClues2,
    Code,
    OtherClues3,
    OpenBox,
    SafeTip,
    OtherClues4,
    Laboratory,
    OpenDoor,
    TakePuppy,
    NotRisk,
    Devices,
    Drafts,
    OtherClues5,
    MyselfKeeper,
    MyselfDevice,
    UseDevice,
    NotRiskDevice,
    UseDiary,
    SearchKeeper,
    TalkKeeper,
    Question1,
    Anomaly,
    Rejection,
    MyselfUncle,
    Again,
}

impl TimeLoopStep {
    /// Every step, in story order.
    pub const ALL: [Self; 29] = [
        Self::Start,
        Self::OpenLetter,
        Self::OtherClues1,
        Self::ReadNotes,
        Self::OtherClues2,
        Self::Code,
        Self::OtherClues3,
        Self::OpenBox,
        Self::SafeTip,
        Self::OtherClues4,
        Self::Laboratory,
        Self::OpenDoor,
        Self::TakePuppy,
        Self::NotRisk,
        Self::Devices,
        Self::Drafts,
        Self::OtherClues5,
        Self::MyselfKeeper,
        Self::MyselfDevice,
        Self::UseDevice,
        Self::NotRiskDevice,
        Self::UseDiary,
        Self::SearchKeeper,
        Self::TalkKeeper,
        Self::Question1,
        Self::Anomaly,
        Self::Rejection,
        Self::MyselfUncle,
        Self::Again,
    ];

    /// Callback data of the step.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "startTimeLoop",
            Self::OpenLetter => "open_letter",
            Self::OtherClues1 => "other_clues_1",
            Self::ReadNotes => "read_notes",
            Self::OtherClues2 => "other_clues_2",
            Self::Code => "code",
            Self::OtherClues3 => "other_clues_3",
            Self::OpenBox => "open_box",
            Self::SafeTip => "safe_tip",
            Self::OtherClues4 => "other_clues_4",
            Self::Laboratory => "laboratory",
            Self::OpenDoor => "open_door",
            Self::TakePuppy => "take_puppy",
            Self::NotRisk => "not_risk",
            Self::Devices => "devices",
            Self::Drafts => "drafts",
            Self::OtherClues5 => "other_clues_5",
            Self::MyselfKeeper => "myselfTS",
            Self::MyselfDevice => "myselfD",
            Self::UseDevice => "use_device",
            Self::NotRiskDevice => "not_risk_D",
            Self::UseDiary => "use_diary",
            Self::SearchKeeper => "searchTS",
            Self::TalkKeeper => "talkTS",
            Self::Question1 => "question1",
            Self::Anomaly => "anomaly",
            Self::Rejection => "rejection",
            Self::MyselfUncle => "myselfUncle",
            Self::Again => "again_time_loop",
        }
    }

    /// Decodes callback data; `None` if it is not a Time Loop step.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == data)
    }
}
