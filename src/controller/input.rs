use super::Msg;
use crate::filter::{Mood, TimeBucket};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// Interactive elements that can receive clicks and key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    SearchButton,
    IngredientField,
    /// Result card carrying the meal id
    Card(String),
    DetailClose,
}

/// Raw input as delivered by a front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    QueryEdited(String),
    Click(Target),
    KeyPress { key: Key, target: Target },
    /// Time selector value: "any" or a number of minutes
    TimeSelected(String),
    MoodToggled { mood: String, checked: bool },
}

impl UiEvent {
    /// Translate to a controller message; `None` when the event has no effect
    pub fn into_msg(self) -> Option<Msg> {
        match self {
            UiEvent::QueryEdited(text) => Some(Msg::QueryEdited(text)),
            UiEvent::Click(target) => Some(activate(target)),
            UiEvent::KeyPress {
                key: Key::Enter,
                target,
            } => Some(activate(target)),
            UiEvent::KeyPress { .. } => None,
            UiEvent::TimeSelected(value) => match value.parse::<TimeBucket>() {
                Ok(bucket) => Some(Msg::TimeSelected(bucket)),
                Err(e) => {
                    warn!("Ignoring time selector change: {}", e);
                    None
                }
            },
            UiEvent::MoodToggled { mood, checked } => {
                Mood::from_key(&mood).map(|mood| Msg::MoodToggled { mood, checked })
            }
        }
    }
}

fn activate(target: Target) -> Msg {
    match target {
        Target::SearchButton | Target::IngredientField => Msg::SubmitSearch,
        Target::Card(id) => Msg::OpenDetail(id),
        Target::DetailClose => Msg::CloseDetail,
    }
}
