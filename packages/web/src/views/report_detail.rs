//! A single report with its AI analysis.

use api::{Removal, Report};
use dioxus::prelude::*;
use ui::icons::{FaArrowLeft, FaDownload, FaTrash};
use ui::{use_notifier, use_session, AuthGuard, Icon, Markdown, Notice};

use super::{redirect_on_auth, ErrorState, LoadingState};
use crate::Route;

#[component]
pub fn ReportDetail(id: String) -> Element {
    rsx! {
        AuthGuard {
            redirect_to: Route::Landing {}.to_string(),
            ReportPanel { id }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Loaded {
    Loading,
    Found(Report),
    Failed(String),
}

#[component]
fn ReportPanel(id: String) -> Element {
    let session = use_session();
    let notifier = use_notifier();
    let nav = use_navigator();

    let mut state = use_signal(|| Loaded::Loading);
    let mut deleting = use_signal(|| false);

    let loader = session.clone();
    let load_id = id.clone();
    let _ = use_resource(move || {
        let session = loader.clone();
        let id = load_id.clone();
        async move {
            match session.report(&id).await {
                Ok(found) => state.set(Loaded::Found(found)),
                Err(e) => {
                    if redirect_on_auth(&e, nav) {
                        return;
                    }
                    tracing::error!("Failed to load report {}: {}", id, e);
                    state.set(Loaded::Failed(e.to_string()));
                }
            }
        }
    });

    let handle_delete = move |_| {
        let session = session.clone();
        let id = id.clone();
        async move {
            deleting.set(true);
            let confirm =
                notifier.confirm(Notice::confirm_delete("This will permanently delete this report!"));
            match session.delete_report_confirmed(&id, confirm).await {
                Ok(Removal::Removed(_)) => {
                    notifier.success("Deleted!", "Your report has been deleted.");
                    nav.push(Route::Dashboard {});
                }
                Ok(Removal::Cancelled) => deleting.set(false),
                Err(e) => {
                    deleting.set(false);
                    if redirect_on_auth(&e, nav) {
                        return;
                    }
                    tracing::error!("Failed to delete report {}: {}", id, e);
                    notifier.error("Error", e.to_string());
                }
            }
        }
    };

    let back = rsx! {
        Link {
            class: "back-link",
            to: Route::Dashboard {},
            Icon { icon: FaArrowLeft, width: 12, height: 12 }
            " Back to Dashboard"
        }
    };

    match state() {
        Loaded::Loading => rsx! { LoadingState { label: "Loading report..." } },
        Loaded::Failed(message) => rsx! {
            section {
                class: "report-detail",
                ErrorState { message }
                {back}
            }
        },
        Loaded::Found(report) => rsx! {
            section {
                class: "report-detail",
                {back}

                header {
                    class: "report-header",
                    h1 { class: "page-title", "{report.display_title()}" }
                    if let Some(date) = report.date_seen.clone().or(report.created_at.clone()) {
                        p { class: "report-date", "Date: {date}" }
                    }
                }

                div {
                    class: "report-actions",
                    if !report.file_url.is_empty() {
                        a {
                            class: "btn",
                            href: "{report.file_url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            Icon { icon: FaDownload, width: 14, height: 14 }
                            " Download Original"
                        }
                    }
                    button {
                        class: "btn btn--danger",
                        disabled: deleting(),
                        onclick: handle_delete,
                        Icon { icon: FaTrash, width: 14, height: 14 }
                        if deleting() { " Deleting..." } else { " Delete Report" }
                    }
                }

                div {
                    class: "card",
                    h2 { class: "section-title", "Summary" }
                    Markdown { text: report.summary_or_placeholder().to_string() }
                }

                if !report.explanation_en.is_empty() {
                    div {
                        class: "card",
                        h2 { class: "section-title", "Explanation (English)" }
                        Markdown { text: report.explanation_en.clone() }
                    }
                }

                if !report.explanation_ro.is_empty() {
                    div {
                        class: "card",
                        h2 { class: "section-title", "Explanation (Roman Urdu)" }
                        Markdown { text: report.explanation_ro.clone() }
                    }
                }

                if !report.suggested_questions.is_empty() {
                    div {
                        class: "card",
                        h2 { class: "section-title", "Questions to ask your doctor" }
                        ul {
                            class: "question-list",
                            for (i, question) in report.suggested_questions.iter().enumerate() {
                                li { key: "{i}", "{question}" }
                            }
                        }
                    }
                }
            }
        },
    }
}
