//! Sign-in / sign-up page.

use api::{ApiError, Credentials, Registration};
use dioxus::prelude::*;
use ui::{use_auth, use_notifier, use_session, AuthState, Notice};

use crate::Route;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    SignIn,
    SignUp,
}

/// Landing page. Toggles between the sign-in and sign-up forms.
#[component]
pub fn Landing() -> Element {
    let session = use_session();
    let mut auth = use_auth();
    let notifier = use_notifier();
    let nav = use_navigator();

    let mut mode = use_signal(|| Mode::SignIn);
    let mut firstname = use_signal(String::new);
    let mut lastname = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in this session
    use_hook(move || {
        if auth.peek().user.is_some() {
            nav.replace(Route::Dashboard {});
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);

            let result: Result<(), ApiError> = match mode() {
                Mode::SignIn => {
                    let credentials = Credentials {
                        email: email().trim().to_string(),
                        password: password(),
                    };
                    match session.login(&credentials).await {
                        Ok(user) => {
                            auth.set(AuthState { user });
                            notifier.notify(
                                Notice::success("Welcome!", "Login successful.").dismiss_after(1200),
                            );
                            nav.push(Route::Dashboard {});
                            Ok(())
                        }
                        Err(e) => Err(e),
                    }
                }
                Mode::SignUp => {
                    let registration = Registration {
                        firstname: firstname().trim().to_string(),
                        lastname: lastname().trim().to_string(),
                        email: email().trim().to_string(),
                        password: password(),
                    };
                    match session.signup(&registration).await {
                        Ok(()) => {
                            notifier.success("Signup successful!", "Please login now.");
                            password.set(String::new());
                            mode.set(Mode::SignIn);
                            Ok(())
                        }
                        Err(e) => Err(e),
                    }
                }
            };

            loading.set(false);
            if let Err(e) = result {
                tracing::debug!("Auth form rejected: {}", e);
                error.set(Some(e.to_string()));
            }
        });
    };

    let is_sign_in = mode() == Mode::SignIn;

    rsx! {
        div {
            class: "auth-page",

            h1 { class: "auth-title", "HealthSync AI" }
            p {
                class: "auth-subtitle",
                if is_sign_in { "Sign in to see your reports" } else { "Create your account" }
            }

            form {
                class: "auth-form",
                onsubmit: handle_submit,

                if let Some(err) = error() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                if !is_sign_in {
                    input {
                        r#type: "text",
                        placeholder: "First name",
                        value: firstname(),
                        oninput: move |evt: FormEvent| firstname.set(evt.value()),
                    }
                    input {
                        r#type: "text",
                        placeholder: "Last name",
                        value: lastname(),
                        oninput: move |evt: FormEvent| lastname.set(evt.value()),
                    }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (min 8 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() {
                        "Please wait..."
                    } else if is_sign_in {
                        "Sign in"
                    } else {
                        "Sign up"
                    }
                }
            }

            p {
                class: "auth-toggle",
                if is_sign_in { "Don't have an account? " } else { "Already have an account? " }
                button {
                    class: "btn-link",
                    r#type: "button",
                    onclick: move |_| {
                        error.set(None);
                        mode.set(if is_sign_in { Mode::SignUp } else { Mode::SignIn });
                    },
                    if is_sign_in { "Sign up" } else { "Sign in" }
                }
            }
        }
    }
}
