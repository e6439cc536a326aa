//! Asynchronous user fetch driven by a thunk.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::{Action, DecodeAction, Dispatch, Reduction, Store, StoreError, Transition};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersState {
    pub fetching: bool,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsersAction {
    RequestingData,
    ReceivedData { users: Vec<String> },
}

impl Action for UsersAction {
    fn kind(&self) -> &'static str {
        match self {
            UsersAction::RequestingData => "REQUESTING_DATA",
            UsersAction::ReceivedData { .. } => "RECEIVED_DATA",
        }
    }
}

impl DecodeAction for UsersAction {
    const KINDS: &'static [&'static str] = &["REQUESTING_DATA", "RECEIVED_DATA"];
}

pub fn requesting_data() -> UsersAction {
    UsersAction::RequestingData
}

pub fn received_data(users: Vec<String>) -> UsersAction {
    UsersAction::ReceivedData { users }
}

pub fn reduce(_state: &UsersState, action: &UsersAction) -> Reduction<UsersState> {
    let next = match action {
        UsersAction::RequestingData => UsersState {
            fetching: true,
            users: Vec::new(),
        },
        UsersAction::ReceivedData { users } => UsersState {
            fetching: false,
            users: users.clone(),
        },
    };
    Ok(Transition::Next(next))
}

/// Marks the store as fetching right away, then delivers `users` once
/// `delay` has elapsed.
pub fn handle_async(delay: Duration, users: Vec<String>) -> Dispatch<UsersState, UsersAction> {
    Dispatch::thunk(move |store: Store<UsersState, UsersAction>| {
        let requested = store.dispatch(requesting_data());
        async move {
            requested?;
            tokio::time::sleep(delay).await;
            tracing::debug!(count = users.len(), "user fetch finished");
            store.dispatch(received_data(users))?;
            Ok::<(), StoreError>(())
        }
    })
}
