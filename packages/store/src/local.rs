//! # Browser `localStorage` credential store
//!
//! [`LocalStorageStore`] is the [`CredentialStore`] used on the **web platform**.
//! The token lives under the [`TOKEN_KEY`] key of `window.localStorage`, so it
//! survives reloads and is scoped to one browser profile.
//!
//! The struct is zero-size and looks the storage object up on every call:
//! `web_sys::Storage` is not `Send`, and the lookup is a cheap property read.
//!
//! ## Error handling
//!
//! Storage can be unavailable (private browsing, disabled cookies). Reads then
//! return `None` and writes are dropped with a warning, which the rest of the
//! app sees as "logged out".

use tracing::warn;

use crate::credential::{normalize_token, CredentialStore, TOKEN_KEY};

/// `localStorage`-backed CredentialStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl CredentialStore for LocalStorageStore {
    fn credential(&self) -> Option<String> {
        let raw = Self::storage()?.get_item(TOKEN_KEY).ok()??;
        normalize_token(&raw)
    }

    fn set_credential(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            warn!("localStorage unavailable, credential not persisted");
            return;
        };
        let result = match normalize_token(token) {
            Some(token) => storage.set_item(TOKEN_KEY, &token),
            None => storage.remove_item(TOKEN_KEY),
        };
        if result.is_err() {
            warn!("Failed to write credential to localStorage");
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(TOKEN_KEY).is_err() {
                warn!("Failed to remove credential from localStorage");
            }
        }
    }
}
