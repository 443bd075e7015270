//! Auth guard decision.
//!
//! A protected view starts in [`GuardState::Checking`] and ends in exactly one
//! of two terminal states. The check never retries and never touches the
//! stored credential: a missing token, a rejected token, a network blip and a
//! malformed profile all look the same and all redirect.

use tracing::{debug, info};

use crate::models::UserInfo;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    Checking,
    Authenticated(UserInfo),
    Redirecting,
}

impl GuardState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GuardState::Checking)
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            GuardState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

impl Session {
    /// Run the guard check for a view activation.
    pub async fn check_auth(&self) -> GuardState {
        let Some(token) = self.credential() else {
            debug!("No credential stored, redirecting");
            return GuardState::Redirecting;
        };

        match self.client().get_user(&token).await {
            Ok(user) => GuardState::Authenticated(user),
            Err(e) => {
                info!("Auth check failed, redirecting: {}", e);
                GuardState::Redirecting
            }
        }
    }

    /// Look up the signed-in user for chrome outside a guarded view.
    ///
    /// Same rules as [`Session::check_auth`] but never asks for a redirect:
    /// no credential means `None` and no request.
    pub async fn restore_user(&self) -> Option<UserInfo> {
        match self.check_auth().await {
            GuardState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
