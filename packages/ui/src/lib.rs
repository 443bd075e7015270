//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod session;
pub use session::make_session;

mod auth;
pub use auth::{
    use_auth, use_restore_user, use_session, AuthGuard, AuthState, LogoutButton, SessionProvider,
};

pub mod notify;
pub use notify::{use_notifier, Notice, NoticeKind, NotificationHost, Notifier};

mod markdown;
pub use markdown::{render_markdown, Markdown};

mod navbar;
pub use navbar::Navbar;
