//! # Application configuration (`healthsync.toml`)
//!
//! The only thing the front-end needs to know about its environment is where
//! the backend lives. That value is read **once** at startup by
//! [`AppConfig::load`] and handed to the API session; nothing else in the app
//! hard-codes a URL.
//!
//! ## Sources, first match wins
//!
//! 1. A `healthsync.toml` in the working directory (native builds only):
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//! ```
//!
//! 2. The `HEALTHSYNC_API_URL` variable captured at compile time
//!    (`option_env!`), which is how the web build is configured.
//! 3. [`ApiConfig::default`], a locally running backend.
//!
//! A config file that fails to parse is logged and skipped.

use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Top-level configuration stored in `healthsync.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

impl AppConfig {
    /// Create a config pointing at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.to_string(),
            },
        }
        .normalized()
    }

    /// Config baked in at build time, falling back to the default URL.
    pub fn from_env() -> Self {
        match option_env!("HEALTHSYNC_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Resolve the startup config from the sources listed above.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let text = std::fs::read_to_string(Self::filename()).ok();
            Self::resolve(text.as_deref())
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_env()
        }
    }

    /// Prefer the contents of a config file, if any and valid, over the build-time value.
    pub fn resolve(file: Option<&str>) -> Self {
        match file.map(Self::from_toml) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                warn!("Ignoring invalid {}: {}", Self::filename(), e);
                Self::from_env()
            }
            None => Self::from_env(),
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "healthsync.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(s).map(Self::normalized)
    }

    /// Base URL of the backend.
    pub fn api_url(&self) -> &str {
        &self.api.base_url
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api.base_url.trim().trim_end_matches('/');
        self.api.base_url = if trimmed.is_empty() {
            default_api_url()
        } else {
            trimmed.to_string()
        };
        self
    }
}
