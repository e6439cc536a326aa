use serde::{Deserialize, Serialize};

use crate::store::{Action, DecodeAction, Reduction, Transition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user: String,
    pub status: String,
    pub friends: String,
    pub community: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user: "CamperBot".to_string(),
            status: "offline".to_string(),
            friends: "732,982".to_string(),
            community: "freeCodeCamp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileAction {
    Online,
    Offline,
}

impl Action for ProfileAction {
    fn kind(&self) -> &'static str {
        match self {
            ProfileAction::Online => "ONLINE",
            ProfileAction::Offline => "OFFLINE",
        }
    }
}

impl DecodeAction for ProfileAction {
    const KINDS: &'static [&'static str] = &["ONLINE", "OFFLINE"];
}

pub fn wake_up() -> ProfileAction {
    ProfileAction::Online
}

pub fn sign_off() -> ProfileAction {
    ProfileAction::Offline
}

/// Copies the profile with only `status` replaced.
pub fn reduce(state: &Profile, action: &ProfileAction) -> Reduction<Profile> {
    let status = match action {
        ProfileAction::Online => "online",
        ProfileAction::Offline => "offline",
    };
    if state.status == status {
        return Ok(Transition::Unchanged);
    }
    Ok(Transition::Next(Profile {
        status: status.to_string(),
        ..state.clone()
    }))
}

pub fn script() -> Vec<ProfileAction> {
    vec![wake_up(), sign_off()]
}
