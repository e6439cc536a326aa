use serde::{Deserialize, Serialize};

use crate::store::{Action, DecodeAction, ReducerError, Reduction, Transition, WithInit};

pub fn default_todos() -> Vec<String> {
    ["Go to the store", "Clean the house", "Cook dinner", "Learn to code"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    AddToDo { todo: String },
    RemoveItem { index: usize },
}

impl Action for TodoAction {
    fn kind(&self) -> &'static str {
        match self {
            TodoAction::AddToDo { .. } => "ADD_TO_DO",
            TodoAction::RemoveItem { .. } => "REMOVE_ITEM",
        }
    }
}

impl DecodeAction for TodoAction {
    const KINDS: &'static [&'static str] = &["ADD_TO_DO", "REMOVE_ITEM"];
}

pub fn add_to_do(todo: impl Into<String>) -> TodoAction {
    TodoAction::AddToDo { todo: todo.into() }
}

pub fn remove_item(index: usize) -> TodoAction {
    TodoAction::RemoveItem { index }
}

/// Builds the next list without touching the current one.
pub fn reduce(state: &Vec<String>, action: &TodoAction) -> Reduction<Vec<String>> {
    match action {
        TodoAction::AddToDo { todo } => {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.extend(state.iter().cloned());
            next.push(todo.clone());
            Ok(Transition::Next(next))
        }
        TodoAction::RemoveItem { index } if *index >= state.len() => Err(ReducerError::new(
            action.kind(),
            format!("index {} out of bounds for {} items", index, state.len()),
        )),
        TodoAction::RemoveItem { index } => {
            let next = state[..*index]
                .iter()
                .chain(&state[*index + 1..])
                .cloned()
                .collect();
            Ok(Transition::Next(next))
        }
    }
}

type TodosFn = fn(&Vec<String>, &TodoAction) -> Reduction<Vec<String>>;

pub fn reducer(initial: Vec<String>) -> WithInit<TodosFn, Vec<String>> {
    WithInit::new(initial, reduce as TodosFn)
}

pub fn script() -> Vec<TodoAction> {
    vec![add_to_do("Walk the dog"), remove_item(0), remove_item(1)]
}
