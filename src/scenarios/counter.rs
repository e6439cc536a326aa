use serde::{Deserialize, Serialize};

use crate::store::{Action, DecodeAction, Reduction, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAction {
    /// Same effect as `Increment`; the name used by the listener walk-through.
    Add,
    Increment,
    Decrement,
}

impl Action for CounterAction {
    fn kind(&self) -> &'static str {
        match self {
            CounterAction::Add => "ADD",
            CounterAction::Increment => "INCREMENT",
            CounterAction::Decrement => "DECREMENT",
        }
    }
}

impl DecodeAction for CounterAction {
    const KINDS: &'static [&'static str] = &["ADD", "INCREMENT", "DECREMENT"];
}

pub fn add() -> CounterAction {
    CounterAction::Add
}

pub fn inc_action() -> CounterAction {
    CounterAction::Increment
}

pub fn dec_action() -> CounterAction {
    CounterAction::Decrement
}

pub fn reduce(state: &i64, action: &CounterAction) -> Reduction<i64> {
    let next = match action {
        CounterAction::Add | CounterAction::Increment => state + 1,
        CounterAction::Decrement => state - 1,
    };
    Ok(Transition::Next(next))
}

pub fn script() -> Vec<CounterAction> {
    vec![add(), add(), add(), dec_action(), inc_action()]
}
