//! # User model
//!
//! The identity projection returned by `GET /profile/getuser` and by a
//! successful login. It is fetched fresh for each view and never mutated on the
//! client, so it is a plain `Deserialize + PartialEq` value.
//!
//! The backend is loose about the shape: the id may arrive as `id` or `_id`,
//! and older accounts lack a first or last name. Missing fields decode as empty
//! strings and [`UserInfo::greeting_name`] supplies the fallback the dashboard
//! shows.

use serde::{Deserialize, Serialize};

/// User information as exposed by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
}

impl UserInfo {
    /// First name for greetings, falling back to "User".
    pub fn greeting_name(&self) -> &str {
        let name = self.firstname.trim();
        if name.is_empty() {
            "User"
        } else {
            name
        }
    }

    /// Full name, falling back to the email address.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.firstname.trim(), self.lastname.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}
