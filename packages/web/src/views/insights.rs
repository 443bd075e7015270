//! AI analysis across all uploaded reports.

use api::{Insight, ResourceList};
use dioxus::prelude::*;
use ui::icons::FaLightbulb;
use ui::{use_session, AuthGuard, Icon, Markdown};

use super::{redirect_on_auth, ErrorState, LoadingState};
use crate::Route;

#[component]
pub fn Insights() -> Element {
    rsx! {
        AuthGuard {
            redirect_to: Route::Landing {}.to_string(),
            InsightsPanel {}
        }
    }
}

#[component]
fn InsightsPanel() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut insights = use_signal(ResourceList::<Insight>::new);

    let _ = use_resource(move || {
        let session = session.clone();
        async move {
            let result = session.insights().await;
            if let Err(e) = &result {
                if redirect_on_auth(e, nav) {
                    return;
                }
                tracing::error!("Failed to load insights: {}", e);
            }
            insights.write().apply_load(result);
        }
    });

    let list = insights.read();

    rsx! {
        section {
            class: "insights",
            h1 { class: "page-title", "AI Health Insights" }

            if list.is_loading() {
                LoadingState { label: "Loading insights..." }
            }
            if let Some(err) = list.error() {
                ErrorState { message: err.to_string() }
            }
            if list.is_empty_loaded() {
                div {
                    class: "state state--empty",
                    Icon { icon: FaLightbulb, width: 28, height: 28 }
                    h3 { "No insights yet" }
                    p { "Upload a report from the dashboard to see analysis here." }
                }
            }

            for insight in list.items().iter() {
                article {
                    key: "{insight.id}",
                    class: "card insight-card",
                    h2 {
                        class: "section-title",
                        if insight.report_title.is_empty() { "Untitled report" } else { "{insight.report_title}" }
                    }
                    if !insight.summary.is_empty() {
                        Markdown { text: insight.summary.clone() }
                    }
                    if !insight.explanation_en.is_empty() {
                        h3 { "English" }
                        Markdown { text: insight.explanation_en.clone() }
                    }
                    if !insight.explanation_ro.is_empty() {
                        h3 { "Roman Urdu" }
                        Markdown { text: insight.explanation_ro.clone() }
                    }
                }
            }
        }
    }
}
