use dioxus::prelude::*;

use store::AppConfig;
use ui::{LogoutButton, Navbar, NotificationHost, SessionProvider};
use views::{Dashboard, Insights, Landing, ReportDetail, Reports, Vitals};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Landing {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/dashboard/report-page/:id")]
        ReportDetail { id: String },
        #[route("/reports")]
        Reports {},
        #[route("/insights")]
        Insights {},
        #[route("/vitals")]
        Vitals {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();

    let config = AppConfig::load();

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<AppConfig>();

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config: config,
            NotificationHost {
                Router::<Route> {}
            }
        }
    }
}

/// Navbar above every page.
#[component]
fn Shell() -> Element {
    ui::use_restore_user();
    let auth = ui::use_auth();
    let signed_in = auth().user.is_some();

    rsx! {
        Navbar {
            if signed_in {
                Link { class: "navbar-link", to: Route::Dashboard {}, "Dashboard" }
                Link { class: "navbar-link", to: Route::Reports {}, "Reports" }
                Link { class: "navbar-link", to: Route::Insights {}, "Insights" }
                Link { class: "navbar-link", to: Route::Vitals {}, "Vitals" }
                LogoutButton {
                    class: "navbar-logout",
                    redirect_to: Route::Landing {}.to_string(),
                }
            } else {
                Link { class: "navbar-link", to: Route::Landing {}, "Sign In" }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
