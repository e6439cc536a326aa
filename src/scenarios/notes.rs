use serde::{Deserialize, Serialize};

use crate::store::{Action, DecodeAction, Reduction, Transition, WithInit};

pub const INITIAL_NOTE: &str = "Initial State";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotesAction {
    AddNote { text: String },
}

impl Action for NotesAction {
    fn kind(&self) -> &'static str {
        match self {
            NotesAction::AddNote { .. } => "ADD_NOTE",
        }
    }
}

impl DecodeAction for NotesAction {
    const KINDS: &'static [&'static str] = &["ADD_NOTE"];
}

pub fn add_note_text(note: impl Into<String>) -> NotesAction {
    NotesAction::AddNote { text: note.into() }
}

pub fn reduce(state: &String, action: &NotesAction) -> Reduction<String> {
    match action {
        NotesAction::AddNote { text } if text == state => Ok(Transition::Unchanged),
        NotesAction::AddNote { text } => Ok(Transition::Next(text.clone())),
    }
}

type NotesFn = fn(&String, &NotesAction) -> Reduction<String>;

/// The notes reducer, starting from [`INITIAL_NOTE`].
pub fn reducer() -> WithInit<NotesFn, String> {
    WithInit::new(INITIAL_NOTE.to_string(), reduce as NotesFn)
}

pub fn script() -> Vec<NotesAction> {
    vec![add_note_text("Hello!")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[test]
    fn starts_with_initial_note() {
        let store = Store::new(reducer());
        assert_eq!(store.get_state().as_str(), INITIAL_NOTE);
    }

    #[test]
    fn add_note_replaces_text() {
        let store = Store::new(reducer());
        store.dispatch(add_note_text("Hello!")).unwrap();
        assert_eq!(store.get_state().as_str(), "Hello!");
    }
}
