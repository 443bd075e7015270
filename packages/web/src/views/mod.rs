mod landing;
pub use landing::Landing;

mod dashboard;
pub use dashboard::Dashboard;

mod report_detail;
pub use report_detail::ReportDetail;

mod reports;
pub use reports::Reports;

mod insights;
pub use insights::Insights;

mod vitals;
pub use vitals::Vitals;

use api::ApiError;
use dioxus::prelude::*;
use dioxus::router::Navigator;

use crate::Route;

/// Send the user back to sign-in when the backend rejected the credential.
/// Returns whether it did.
pub(crate) fn redirect_on_auth(err: &ApiError, nav: Navigator) -> bool {
    if err.is_auth() {
        tracing::warn!("Credential rejected, returning to sign-in: {}", err);
        nav.replace(Route::Landing {});
        true
    } else {
        false
    }
}

/// Shown while a list or record is being fetched.
#[component]
pub(crate) fn LoadingState(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "state state--loading", "{label}" }
    }
}

/// Error affordance for a failed fetch.
#[component]
pub(crate) fn ErrorState(message: String) -> Element {
    rsx! {
        div {
            class: "state state--error",
            role: "alert",
            "{message}"
        }
    }
}
