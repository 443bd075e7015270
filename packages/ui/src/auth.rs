//! Session context, the auth guard and the logout button.

use api::{AppConfig, GuardState, Session, UserInfo};
use dioxus::prelude::*;
use tracing::warn;

use crate::notify::{use_notifier, Notice};
use crate::session::make_session;

/// What the shell knows about the signed-in user.
///
/// Written by [`AuthGuard`] after each successful check and by logout; read by
/// the navbar and by views that greet the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
}

/// Get the API session. Every backend call goes through it.
pub fn use_session() -> Session {
    use_context::<Session>()
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that installs the session and auth state.
/// Wrap your app with this component; `config` is read once in `main`.
#[component]
pub fn SessionProvider(config: AppConfig, children: Element) -> Element {
    use_context_provider(|| make_session(&config));
    use_context_provider(|| Signal::new(AuthState::default()));

    rsx! {
        {children}
    }
}

/// Fill [`AuthState`] from a stored credential when nothing has yet.
///
/// For the navigation shell: after a reload on an unguarded page the user is
/// still known. Never redirects. Re-runs whenever the auth state is cleared,
/// which costs nothing once the credential is gone.
pub fn use_restore_user() {
    let session = use_session();
    let mut auth = use_auth();

    let _ = use_resource(move || {
        let session = session.clone();
        let known = auth().user.is_some();
        async move {
            if known {
                return;
            }
            if let Some(user) = session.restore_user().await {
                auth.set(AuthState { user: Some(user) });
            }
        }
    });
}

/// Gate `children` behind a successful auth check.
///
/// Runs once per mount. With no stored credential it redirects immediately;
/// otherwise it validates the credential against the backend. Any failure
/// sends the user to `redirect_to` without retrying.
#[component]
pub fn AuthGuard(#[props(into)] redirect_to: String, children: Element) -> Element {
    let session = use_session();
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut state = use_signal(|| GuardState::Checking);

    let _ = use_resource(move || {
        let session = session.clone();
        let redirect_to = redirect_to.clone();
        async move {
            let outcome = session.check_auth().await;
            match &outcome {
                GuardState::Authenticated(user) => {
                    auth.set(AuthState {
                        user: Some(user.clone()),
                    });
                }
                _ => {
                    auth.set(AuthState::default());
                    nav.replace(redirect_to);
                }
            }
            state.set(outcome);
        }
    });

    match state() {
        GuardState::Authenticated(_) => rsx! { {children} },
        GuardState::Redirecting => rsx! {},
        GuardState::Checking => rsx! {
            div {
                class: "guard-checking",
                "Loading..."
            }
        },
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(into)] redirect_to: String,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();
    let mut auth = use_auth();
    let notifier = use_notifier();
    let nav = use_navigator();

    let onclick = move |_| {
        let session = session.clone();
        let redirect_to = redirect_to.clone();
        async move {
            if let Err(e) = session.logout().await {
                warn!("Logout request failed: {}", e);
            }
            auth.set(AuthState::default());
            notifier.notify(Notice::success("Success", "Logged out successfully"));
            nav.replace(redirect_to);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
