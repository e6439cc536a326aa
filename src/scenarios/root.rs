//! Auth and counter slices combined under one root state.

use serde::{Deserialize, Serialize};

use crate::combine_reducers;
use crate::store::{narrow, Action, Combine, DecodeAction};

use super::auth::{self, AuthAction, AuthState};
use super::counter::{self, CounterAction};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootState {
    pub auth: AuthState,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootAction {
    Auth(AuthAction),
    Counter(CounterAction),
}

impl RootAction {
    pub fn as_auth(&self) -> Option<&AuthAction> {
        match self {
            RootAction::Auth(action) => Some(action),
            RootAction::Counter(_) => None,
        }
    }

    pub fn as_counter(&self) -> Option<&CounterAction> {
        match self {
            RootAction::Counter(action) => Some(action),
            RootAction::Auth(_) => None,
        }
    }
}

impl From<AuthAction> for RootAction {
    fn from(action: AuthAction) -> Self {
        RootAction::Auth(action)
    }
}

impl From<CounterAction> for RootAction {
    fn from(action: CounterAction) -> Self {
        RootAction::Counter(action)
    }
}

impl Action for RootAction {
    fn kind(&self) -> &'static str {
        match self {
            RootAction::Auth(action) => action.kind(),
            RootAction::Counter(action) => action.kind(),
        }
    }
}

impl DecodeAction for RootAction {
    const KINDS: &'static [&'static str] =
        &["LOGIN", "LOGOUT", "ADD", "INCREMENT", "DECREMENT"];
}

pub fn root_reducer() -> Combine<RootState, RootAction> {
    combine_reducers!(RootState {
        auth: narrow(auth::reduce, RootAction::as_auth),
        count: narrow(counter::reduce, RootAction::as_counter),
    })
}

pub fn script() -> Vec<RootAction> {
    vec![
        counter::inc_action().into(),
        auth::login_user().into(),
        counter::inc_action().into(),
        counter::dec_action().into(),
        auth::logout_user().into(),
    ]
}
