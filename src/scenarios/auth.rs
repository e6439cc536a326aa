use serde::{Deserialize, Serialize};

use crate::store::{Action, DecodeAction, Reduction, Transition};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub authenticated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthAction {
    Login,
    Logout,
}

impl Action for AuthAction {
    fn kind(&self) -> &'static str {
        match self {
            AuthAction::Login => "LOGIN",
            AuthAction::Logout => "LOGOUT",
        }
    }
}

impl DecodeAction for AuthAction {
    const KINDS: &'static [&'static str] = &["LOGIN", "LOGOUT"];
}

pub fn login_user() -> AuthAction {
    AuthAction::Login
}

pub fn logout_user() -> AuthAction {
    AuthAction::Logout
}

pub fn reduce(state: &AuthState, action: &AuthAction) -> Reduction<AuthState> {
    let authenticated = matches!(action, AuthAction::Login);
    if state.authenticated == authenticated {
        return Ok(Transition::Unchanged);
    }
    Ok(Transition::Next(AuthState { authenticated }))
}

pub fn script() -> Vec<AuthAction> {
    vec![login_user(), login_user(), logout_user()]
}
