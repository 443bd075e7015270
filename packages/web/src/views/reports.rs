//! All of the user's reports.

use api::{Report, ResourceList};
use dioxus::prelude::*;
use ui::icons::{FaDownload, FaEye, FaTrash};
use ui::{use_notifier, use_session, AuthGuard, Icon, Notice};

use super::{redirect_on_auth, ErrorState, LoadingState};
use crate::Route;

#[component]
pub fn Reports() -> Element {
    rsx! {
        AuthGuard {
            redirect_to: Route::Landing {}.to_string(),
            ReportsPanel {}
        }
    }
}

#[component]
fn ReportsPanel() -> Element {
    let session = use_session();
    let notifier = use_notifier();
    let nav = use_navigator();

    let mut reports = use_signal(ResourceList::<Report>::new);
    let mut deleting = use_signal(|| Option::<String>::None);

    let loader = session.clone();
    let _ = use_resource(move || {
        let session = loader.clone();
        async move {
            let result = session.my_reports().await;
            if let Err(e) = &result {
                if redirect_on_auth(e, nav) {
                    return;
                }
                tracing::error!("Failed to load reports: {}", e);
            }
            reports.write().apply_load(result);
        }
    });

    let delete_report = use_callback(move |id: String| {
        let session = session.clone();
        spawn(async move {
            deleting.set(Some(id.clone()));
            let confirm =
                notifier.confirm(Notice::confirm_delete("This will permanently delete this report!"));
            let outcome = session.delete_report_confirmed(&id, confirm).await;
            deleting.set(None);

            if reports.write().apply_removal(&outcome) {
                notifier.success("Deleted!", "Your report has been deleted.");
            }
            if let Err(e) = outcome {
                if redirect_on_auth(&e, nav) {
                    return;
                }
                tracing::error!("Failed to delete report {}: {}", id, e);
                notifier.error("Error", e.to_string());
            }
        });
    });

    let list = reports.read();

    rsx! {
        section {
            class: "reports",
            h1 { class: "page-title", "My Reports" }

            if list.is_loading() {
                LoadingState { label: "Loading reports..." }
            }
            if let Some(err) = list.error() {
                ErrorState { message: err.to_string() }
            }
            if list.is_empty_loaded() {
                p {
                    class: "state state--empty",
                    "No reports uploaded yet. Upload some from your dashboard!"
                }
            }

            ul {
                class: "report-list",
                for report in list.items().iter().cloned() {
                    ReportRow {
                        key: "{report.id}",
                        busy: deleting().as_deref() == Some(report.id.as_str()),
                        on_delete: delete_report,
                        report,
                    }
                }
            }
        }
    }
}

#[component]
fn ReportRow(report: Report, busy: bool, on_delete: EventHandler<String>) -> Element {
    let id = report.id.clone();

    rsx! {
        li {
            class: "report-row",
            div {
                class: "report-row-text",
                span { class: "report-title", "{report.display_title()}" }
                span { class: "report-summary", "{report.summary_or_placeholder()}" }
            }
            div {
                class: "report-row-actions",
                Link {
                    class: "btn",
                    to: Route::ReportDetail { id: report.id.clone() },
                    Icon { icon: FaEye, width: 14, height: 14 }
                    " View"
                }
                if !report.file_url.is_empty() {
                    a {
                        class: "btn",
                        href: "{report.file_url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        Icon { icon: FaDownload, width: 14, height: 14 }
                        " Download"
                    }
                }
                button {
                    class: "btn btn--danger",
                    disabled: busy,
                    onclick: move |_| on_delete.call(id.clone()),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                    if busy { " Deleting..." } else { " Delete" }
                }
            }
        }
    }
}
