use serde::{Deserialize, Serialize};

use crate::store::{Action, DecodeAction, Reduction, Transition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageAction {
    #[serde(rename = "ADD")]
    AddMessage { message: String },
}

impl Action for MessageAction {
    fn kind(&self) -> &'static str {
        match self {
            MessageAction::AddMessage { .. } => "ADD",
        }
    }
}

impl DecodeAction for MessageAction {
    const KINDS: &'static [&'static str] = &["ADD"];
}

pub fn add_message(message: impl Into<String>) -> MessageAction {
    MessageAction::AddMessage {
        message: message.into(),
    }
}

pub fn reduce(state: &Vec<String>, action: &MessageAction) -> Reduction<Vec<String>> {
    match action {
        MessageAction::AddMessage { message } => {
            let mut next = state.clone();
            next.push(message.clone());
            Ok(Transition::Next(next))
        }
    }
}

pub fn script() -> Vec<String> {
    vec![
        "Hello".to_string(),
        "State flows one way".to_string(),
        "Bye".to_string(),
    ]
}
