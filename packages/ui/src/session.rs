//! Shared session constructor for all platforms.
//!
//! Returns an [`api::Session`] backed by the appropriate [`store::CredentialStore`]:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Everything else**: in-memory via [`store::MemoryStore`], which forgets the
//!   credential when the process exits

use api::{AppConfig, Session};
use tracing::info;

/// Create a platform-appropriate session talking to the configured backend.
pub fn make_session(config: &AppConfig) -> Session {
    info!("Using backend at {}", config.api_url());

    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Session::from_config(config, store::LocalStorageStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Session::from_config(config, store::MemoryStore::new())
    }
}
