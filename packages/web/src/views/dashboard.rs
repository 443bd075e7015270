//! Dashboard: greeting, report upload and the recent reports list.

use api::{validation::validate_upload, Report, ResourceList, UploadFile};
use dioxus::prelude::*;
use ui::icons::FaUpload;
use ui::{use_auth, use_notifier, use_session, AuthGuard, Icon, Notice};

use super::{redirect_on_auth, ErrorState, LoadingState};
use crate::Route;

const ACCEPTED_FILES: &str = ".pdf,.png,.jpg,.jpeg";

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        AuthGuard {
            redirect_to: Route::Landing {}.to_string(),
            DashboardPanel {}
        }
    }
}

#[component]
fn DashboardPanel() -> Element {
    let session = use_session();
    let auth = use_auth();
    let notifier = use_notifier();
    let nav = use_navigator();

    let mut reports = use_signal(ResourceList::<Report>::new);
    let mut uploading = use_signal(|| false);

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

    let handle_file = move |evt: FormEvent| {
        let session = session.clone();
        async move {
            let file = evt.files().into_iter().next();
            let name = file.as_ref().map(|f| f.name());
            let content_type = file.as_ref().and_then(|f| f.content_type());
            if let Err(e) = validate_upload(name.as_deref(), content_type.as_deref()) {
                notifier.error("Error", e.to_string());
                return;
            }
            let Some(file) = file else {
                return;
            };

            uploading.set(true);
            let bytes = match file.read_bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    tracing::error!("Failed to read {}: {}", file.name(), e);
                    uploading.set(false);
                    notifier.error("Error", "Error uploading file");
                    return;
                }
            };

            let upload = UploadFile::new(file.name(), content_type, bytes);
            let result = session.upload_report(upload).await;
            uploading.set(false);

            match result {
                Ok(report) => {
                    let id = report.id.clone();
                    reports.write().prepend(report);
                    let view = notifier
                        .confirm(
                            Notice::success("Success", "Report uploaded successfully!")
                                .with_confirm("View Analysis")
                                .with_cancel("Close"),
                        )
                        .await;
                    if view {
                        nav.push(Route::ReportDetail { id });
                    }
                }
                Err(e) => {
                    if redirect_on_auth(&e, nav) {
                        return;
                    }
                    tracing::error!("Upload failed: {}", e);
                    let message = e.to_string();
                    let message = if message.trim().is_empty() {
                        "Error uploading file".to_string()
                    } else {
                        message
                    };
                    notifier.error("Error", message);
                }
            }
        }
    };

    let greeting = auth()
        .user
        .map(|user| user.greeting_name().to_string())
        .unwrap_or_else(|| "User".to_string());
    let list = reports.read();

    rsx! {
        section {
            class: "dashboard",

            h1 { class: "page-title", "Welcome back, {greeting}" }
            p { class: "page-subtitle", "Upload a lab report to get a plain-language explanation." }

            label {
                class: if uploading() { "upload-card upload-card--busy" } else { "upload-card" },
                Icon { icon: FaUpload, width: 20, height: 20 }
                span {
                    if uploading() { "Uploading..." } else { "Upload Report" }
                }
                input {
                    class: "upload-input",
                    r#type: "file",
                    accept: ACCEPTED_FILES,
                    disabled: uploading(),
                    onchange: handle_file,
                }
            }

            h2 { class: "section-title", "Recent Reports" }

            if list.is_loading() {
                LoadingState {}
            }
            if let Some(err) = list.error() {
                ErrorState { message: err.to_string() }
            }
            if list.is_empty_loaded() {
                p { class: "state state--empty", "No reports uploaded yet." }
            }

            ul {
                class: "report-list",
                for report in list.items().iter() {
                    li {
                        key: "{report.id}",
                        class: "report-row",
                        Link {
                            class: "report-link",
                            to: Route::ReportDetail { id: report.id.clone() },
                            "{report.display_title()}"
                        }
                        span { class: "report-summary", "{report.summary_or_placeholder()}" }
                    }
                }
            }
        }
    }
}
