//! The credential store abstraction.

/// Storage key under which the bearer token is kept.
pub const TOKEN_KEY: &str = "token";

/// Holder of the opaque session credential.
///
/// Implementations are read synchronously right before every protected request,
/// so `credential` must be cheap. There is no expiry tracking here: a token is
/// valid until the backend rejects it or [`CredentialStore::clear`] is called.
pub trait CredentialStore: Send + Sync {
    fn credential(&self) -> Option<String>;

    fn set_credential(&self, token: &str);

    fn clear(&self);

    fn has_credential(&self) -> bool {
        self.credential().is_some()
    }
}

/// Strip whitespace and stray double quotes the backend sometimes wraps around
/// the token. Returns `None` when nothing is left.
pub fn normalize_token(raw: &str) -> Option<String> {
    let token: String = raw.chars().filter(|c| *c != '"').collect();
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
