//! Worked scenarios for the state container.
//!
//! Each module defines a state, its action enum with action creators, and
//! a reducer. The CLI runs them as scripted walk-throughs or replays JSON
//! action logs through them.

pub mod auth;
pub mod counter;
pub mod messages;
pub mod notes;
pub mod profile;
pub mod root;
pub mod todos;
pub mod users;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    Counter,
    Auth,
    Notes,
    Todos,
    Profile,
    Users,
    Messages,
    Root,
}

impl Scenario {
    pub const ALL: [Scenario; 8] = [
        Scenario::Counter,
        Scenario::Auth,
        Scenario::Notes,
        Scenario::Todos,
        Scenario::Profile,
        Scenario::Users,
        Scenario::Messages,
        Scenario::Root,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Counter => "counter",
            Scenario::Auth => "auth",
            Scenario::Notes => "notes",
            Scenario::Todos => "todos",
            Scenario::Profile => "profile",
            Scenario::Users => "users",
            Scenario::Messages => "messages",
            Scenario::Root => "root",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::Counter => "ADD / INCREMENT / DECREMENT on a number",
            Scenario::Auth => "LOGIN / LOGOUT toggling an authenticated flag",
            Scenario::Notes => "ADD_NOTE replacing a text note",
            Scenario::Todos => "ADD_TO_DO / REMOVE_ITEM on a list, without mutation",
            Scenario::Profile => "ONLINE / OFFLINE copying a profile with a new status",
            Scenario::Users => "thunk that requests users and receives them after a delay",
            Scenario::Messages => "ADD messages through a bound action creator",
            Scenario::Root => "auth and counter slices combined into one root state",
        }
    }
}
