//! Static content of the Time Loop: texts, pictures, and buttons.
//!
//! A [`Scene`] is what one step puts on screen. Buttons are attached to the
//! last frame of the scene.

use self::Frame::{Photo, Text};
use super::step::TimeLoopStep;
use super::step::TimeLoopStep as S;

/// One message of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Text(&'static str),
    /// File name inside the media directory.
    Photo(&'static str),
}

/// A button leading to another step.
pub type Choice = (&'static str, TimeLoopStep);

/// Messages and buttons shown for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    pub frames: &'static [Frame],
    pub choices: &'static [Choice],
}

pub const LEGEND: [&str; 3] = [
    "Вы - молодой журналист, который получает странное письмо от своего пропавшего дяди \
     известного археолога.",
    "В письме дядя утверждает, что нашел способ путешествовать во времени, \
     но что-то пошло не так, и он застрял в прошлом.",
    "Вы должны разгадать тайну исчезновения дяди, \
     используя письма, найденные в его кабинете, и свои детективные способности.",
];
pub const PLAY_LABEL: &str = "Играть";
pub const OTHER_QUESTS_LABEL: &str = "Другие квесты";

pub const LETTER_ON_DESK: Scene = Scene {
    frames: &[Text("Вы видете письмо на столе")],
    choices: &[
        ("Открыть письмо", S::OpenLetter),
        ("Искать другие улики", S::OtherClues1),
    ],
};

pub const BOX_LOCKED: Scene = Scene {
    frames: &[Text(
        "В шкафу Вы находите ящик, запертый на ключ. \
         Внутри - странный артефакт, похожий на кулон. \
         В дневнике дяди упоминается, что этот артефакт может служить ключом к путешествию во времени, \
         \"Ключом Времени\". \nЧто вы делаете?",
    )],
    choices: &[
        ("Попытаться открыть ящик", S::OpenBox),
        ("Не трогать ящик", S::OtherClues4),
        ("Вернуться назад", S::OtherClues2),
    ],
};

pub const BOX_EMPTY: Scene = Scene {
    frames: &[Text(
        "В шкафу Вы находите ящик, который уже открыли, а внутри пыль. \
         Видно, что когда-то тут лежал кулон. Который Вы уже взяли.",
    )],
    choices: &[
        ("Искать дальше", S::OtherClues4),
        ("Вернуться назад", S::OtherClues2),
    ],
};

pub const ENTER_CODE: Scene = Scene {
    frames: &[Text("Введите пароль:")],
    choices: &[("Вернуться назад", S::OtherClues3)],
};

pub const PUPPY_TAKEN: Scene = Scene {
    frames: &[
        Photo("Kopernik.png"),
        Text("Это оказалась очень умная и добрая собака. Теперь у тебя появился новый пушистый друг"),
    ],
    choices: &[("Вернуться назад", S::NotRisk)],
};

const DIARY_PHOTO: [Frame; 2] = [
    Text("В дневнике Вы нашли это фото.\n Благодаря ему Вы нашли прибор Вашего дяди"),
    Photo("Location_device.JPG"),
];

pub const DEVICE_FOUND: Scene = Scene {
    frames: &[
        DIARY_PHOTO[0],
        DIARY_PHOTO[1],
        Text(
            "Вы нашли прибор, где «Ключ Времени» может открыть временную аномалию. \
             После того, как вы воспользовались прибором, повернув ключ, \
             Вас встречает Хранитель Времени.",
        ),
    ],
    choices: &[
        ("Заговорить с Хранителем времени", S::TalkKeeper),
        ("Попытаться вернуть дядю самостоятельно", S::MyselfUncle),
    ],
};

/// Shown before the "no key" ending.
pub const DIARY_WITHOUT_KEY: [Frame; 2] = DIARY_PHOTO;

pub const CODE_ACCEPTED: &str = "Успешно";
pub const WRONG_CODE: &str = "----НЕВЕРНЫЙ КОД!----\n попробуйте еще раз";
pub const HINT_LABEL: &str = "Подсказка";
pub const BACK_LABEL: &str = "Вернуться назад";

pub const KEY_FOUND: Scene = Scene {
    frames: &[
        Text(CODE_ACCEPTED),
        Text("Вы нашли артефакт"),
        Photo("Key.png"),
        Text("Это «Ключ Времени», которые поможет вам воспользоваться временной аномалией"),
    ],
    choices: &[
        ("Искать другие улики", S::OtherClues4),
        ("Вернуться назад", S::OtherClues3),
    ],
};

pub const CORRECT: &str = "Правильно!";

pub const KEEPER_ALLOWS: Scene = Scene {
    frames: &[Text(
        "Хранитель:\n Ты достоин, воспользоваться временной аномалией, \
         я разрешаю попасть тебе туда, куда тебе нужно",
    )],
    choices: &[
        ("Воспользоваться аномалией", S::Anomaly),
        ("Отказаться", S::Rejection),
    ],
};

/// Content of the steps that always look the same.
#[must_use]
pub fn fixed_scene(step: TimeLoopStep) -> Option<Scene> {
    let scene = match step {
        S::OpenLetter => Scene {
            frames: &[Photo("First_letter.JPG")],
            choices: &[("Искать другие улики", S::OtherClues1)],
        },
        S::OtherClues1 => Scene {
            frames: &[Text(
                "Среди бумаг дяди вы находите стопку записок, оставленных им во время его путешествия в прошлое. \
                 В них он описывает свои впечатления, людей, с которыми встретился, и события, которые наблюдал. \
                 Хотите прочитать записку?",
            )],
            choices: &[
                ("Да", S::ReadNotes),
                ("Нет", S::OtherClues2),
                ("Вернуться к письму", S::Start),
            ],
        },
        S::ReadNotes => Scene {
            frames: &[Photo("Notes.png")],
            choices: &[
                ("Искать другие улики", S::OtherClues2),
                ("Вернуться назад", S::OtherClues1),
            ],
        },
        S::OtherClues2 => Scene {
            frames: &[Text(
                "В ящике стола вы находите дневник Вашего дяди, в котором зашифрован непонятный код.\n \
                 В нем он записывал свои наблюдения, результаты исследований и некоторые тайные записи.",
            )],
            choices: &[
                ("Изучить записи", S::Code),
                ("Не трогать дневник", S::OtherClues3),
                ("Вернуться назад", S::OtherClues1),
            ],
        },
        S::Code => Scene {
            frames: &[Photo("Code.png")],
            choices: &[
                ("Искать другие улики", S::OtherClues3),
                ("Вернуться назад", S::OtherClues2),
            ],
        },
        S::SafeTip => Scene {
            frames: &[Photo("Tip.png")],
            choices: &[("Вернуться к коду (подсказка исчезнет)", S::OpenBox)],
        },
        S::OtherClues4 => Scene {
            frames: &[Text(
                "За книжным шкафом вы обнаруживаете тайный ход. \
                 В дневнике дяди упоминается, что он использовал этот ход, \
                 чтобы добраться до места проведения своих экспериментов. \
                 \nЧто вы делаете?",
            )],
            choices: &[
                ("Войти в тайный ход", S::Laboratory),
                ("Назад", S::OtherClues3),
            ],
        },
        S::Laboratory => Scene {
            frames: &[Text(
                "Как только Вы вошли, дверь с грохотом закрылась. \
                 Вы попали в заброшенную пыльную лабораторию дяди. \
                 Тут очень мало света, но Вам удается что-то разглядеть. \
                 Здесь Вы видите несколько приборов, записную книжку с информацией о путешествиях во времени и чертежи. \
                 \nЧто вы делаете?",
            )],
            choices: &[
                ("Попытаться открыть дверь", S::OpenDoor),
                ("Изучить записную книжку", S::Devices),
                ("Посмотреть чертеж", S::Drafts),
                ("Искать другие улики", S::OtherClues5),
            ],
        },
        S::OpenDoor => Scene {
            frames: &[Text(
                "Дверь заклинило. У Вас не получается её открыть, но вы заметили щенка, привязанного к ножке стола \
                 с надписью на ошейнике КОПЕРНИК. Он выглядит уставшим. Однако Вы замечаете его умные глаза и острые когти",
            )],
            choices: &[
                ("Взять щенка себе", S::TakePuppy),
                ("Не рисковать", S::NotRisk),
            ],
        },
        S::NotRisk => Scene {
            frames: &[Text(
                "Вы в заброшенной лаборатории дяди. \
                 Тут очень мало света, но Вам удается что-то разглядеть. \
                 Здесь Вы видите несколько приборов, записную книжку с информацией о путешествиях во времени и чертежи. \
                 \nЧто Вы делаете?",
            )],
            choices: &[
                ("Изучить записную книжку", S::Devices),
                ("Посмотреть чертеж", S::Drafts),
                ("Искать другие улики", S::OtherClues5),
            ],
        },
        S::Devices => Scene {
            frames: &[Photo("page_1.JPG")],
            choices: &[("Вернуться назад", S::NotRisk)],
        },
        S::Drafts => Scene {
            frames: &[Photo("device.JPG")],
            choices: &[("Вернуться назад", S::NotRisk)],
        },
        S::OtherClues5 => Scene {
            frames: &[Text(
                "Вы нашли информацию о том, как ваш дядя попал в прошлое, \
                 и кто мог бы ему помочь. В записках дяди упоминается \
                 «Хранитель Времени», который, по его мнению, может помочь ему вернуться. \
                 \nВам нужно найти его.",
            )],
            choices: &[
                ("Изучить информацию о Хранителе Времени", S::SearchKeeper),
                ("Искать Хранителя Времени самостоятельно", S::MyselfKeeper),
            ],
        },
        S::MyselfKeeper => Scene {
            frames: &[Text(
                "В записках дяди вы обнаруживаете, что \"Ключ Времени\" \
                 - это не просто артефакт, а ключ к особой точке во времени, \
                 связанной с Хранителем Времени. Вам нужно найти это место, где использовать его.",
            )],
            choices: &[
                ("Использовать информацию из дневника", S::UseDiary),
                ("Искать прибор самостоятельно в другом месте", S::MyselfDevice),
            ],
        },
        S::MyselfDevice => Scene {
            frames: &[Text(
                "Вы нашли прибор, отдалённо напоминающий нужное устройство. Однако он может быть опасен",
            )],
            choices: &[
                ("Использовать этот прибор", S::UseDevice),
                ("Не рисковать, не использовать прибор", S::NotRiskDevice),
            ],
        },
        S::NotRiskDevice => Scene {
            frames: &[Text("Прибор Вам немного напомнил бомбу и Вы решили не рисковать")],
            choices: &[("Использовать информацию из дневника", S::UseDiary)],
        },
        S::SearchKeeper => Scene {
            frames: &[
                Text("В дневнике Вы находите следующую запись"),
                Photo("page_2.JPG"),
            ],
            choices: &[("Найти прибор", S::UseDiary)],
        },
        S::TalkKeeper => Scene {
            frames: &[Text(
                "Хранитель:\n Приветствую тебя, я полагаю твое появление здесь связанно с тем, \
                 чтобы воспользоваться «Ключом времени». Я должен убедиться, \
                 что ты достоин моей помощи. Тебе нужно будет ответить на \
                 3 вопроса и у тебя будет 4 попытки на каждый вопрос. \
                 Справишься - я помогу тебе, иначе ты будешь страдать",
            )],
            choices: &[
                ("Согласиться ответить на вопросы", S::Question1),
                ("Проигнорировать и самостоятельно спасти Дядю", S::MyselfUncle),
            ],
        },
        _ => return None,
    };
    Some(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fixed_scene_has_frames_and_choices() {
        for step in TimeLoopStep::ALL {
            if let Some(scene) = fixed_scene(step) {
                assert!(!scene.frames.is_empty(), "{step:?}");
                assert!(!scene.choices.is_empty(), "{step:?}");
            }
        }
    }

    #[test]
    fn test_dynamic_steps_have_no_fixed_scene() {
        for step in [
            S::Start,
            S::OtherClues3,
            S::OpenBox,
            S::TakePuppy,
            S::UseDevice,
            S::UseDiary,
            S::Question1,
            S::Anomaly,
            S::Rejection,
            S::MyselfUncle,
            S::Again,
        ] {
            assert_eq!(fixed_scene(step), None, "{step:?}");
        }
    }

    #[test]
    fn test_notes_lead_back_to_clues() {
        let scene = fixed_scene(S::ReadNotes).unwrap();

        assert_eq!(scene.frames, &[Photo("Notes.png")]);
        assert_eq!(scene.choices[1], ("Вернуться назад", S::OtherClues1));
    }
}
