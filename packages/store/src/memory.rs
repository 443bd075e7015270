use std::sync::{Arc, Mutex};

use crate::credential::{normalize_token, CredentialStore};

/// In-memory CredentialStore for testing and non-browser builds.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set_credential(token);
        store
    }
}

impl CredentialStore for MemoryStore {
    fn credential(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn set_credential(&self, token: &str) {
        *self.token.lock().unwrap() = normalize_token(token);
    }

    fn clear(&self) {
        self.token.lock().unwrap().take();
    }
}
