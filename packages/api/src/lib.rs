//! # API crate: the HealthSync backend as seen from the front-end
//!
//! All business logic lives in an external backend reached over HTTP. This
//! crate is everything the views need to talk to it, written as plain Rust so
//! it compiles for `wasm32` and is testable natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `ApiClient`: typed wrappers for each REST endpoint, bearer header, error-body handling |
//! | [`session`] | `Session`: the single read/write boundary for the credential; every view call goes through it |
//! | [`guard`] | `GuardState` and `Session::check_auth`, the per-view auth check |
//! | [`resource`] | `ResourceList`: view-local list state and its load/prepend/remove rules; confirm-before-delete |
//! | [`validation`] | Client-side checks for the login, sign-up, upload and vitals forms |
//! | [`error`] | `ApiError` taxonomy and server error-body coercion |
//! | [`models`] | `UserInfo`, `Report`, `Insight`, `Vital` |
//!
//! ## Credential transport
//!
//! Every protected request carries `Authorization: Bearer <token>`. Cookies
//! are never relied on.

pub mod client;
pub mod error;
pub mod guard;
pub mod models;
pub mod resource;
pub mod session;
pub mod validation;

pub use client::{ApiClient, LoginResponse};
pub use error::ApiError;
pub use guard::GuardState;
pub use models::{Insight, Report, UserInfo, Vital, VitalForm};
pub use resource::{confirm_then_delete, LoadStatus, Removal, Resource, ResourceList};
pub use session::Session;
pub use validation::{Credentials, Registration, UploadFile, ValidationError};

pub use store::AppConfig;
