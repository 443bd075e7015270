//! Vitals log: add a reading, list past ones, delete.

use api::{ResourceList, Vital, VitalForm};
use dioxus::prelude::*;
use ui::icons::FaTrash;
use ui::{use_notifier, use_session, AuthGuard, Icon, Notice};

use super::{redirect_on_auth, ErrorState, LoadingState};
use crate::Route;

#[component]
pub fn Vitals() -> Element {
    rsx! {
        AuthGuard {
            redirect_to: Route::Landing {}.to_string(),
            VitalsPanel {}
        }
    }
}

#[component]
fn VitalsPanel() -> Element {
    let session = use_session();
    let notifier = use_notifier();
    let nav = use_navigator();

    let mut vitals = use_signal(ResourceList::<Vital>::new);
    let mut form = use_signal(VitalForm::default);
    let mut submitting = use_signal(|| false);
    let mut deleting = use_signal(|| Option::<String>::None);

    let loader = session.clone();
    let _ = use_resource(move || {
        let session = loader.clone();
        async move {
            let result = session.my_vitals().await;
            if let Err(e) = &result {
                if redirect_on_auth(e, nav) {
                    return;
                }
                tracing::error!("Failed to load vitals: {}", e);
            }
            vitals.write().apply_load(result);
        }
    });

    let adder = session.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = adder.clone();
        spawn(async move {
            let entry = form();
            submitting.set(true);
            let result = session.add_vital(&entry).await;
            submitting.set(false);

            match result {
                Ok(vital) => {
                    vitals.write().prepend(vital);
                    form.write().clear();
                    notifier.notify(Notice::success("Saved", "Vitals recorded.").dismiss_after(1200));
                }
                Err(e) => {
                    if redirect_on_auth(&e, nav) {
                        return;
                    }
                    tracing::warn!("Vitals not saved: {}", e);
                    notifier.error("Error", e.to_string());
                }
            }
        });
    };

    let delete_vital = use_callback(move |id: String| {
        let session = session.clone();
        spawn(async move {
            deleting.set(Some(id.clone()));
            let confirm = notifier.confirm(Notice::confirm_delete("This action cannot be undone!"));
            let outcome = session.delete_vital_confirmed(&id, confirm).await;
            deleting.set(None);

            if vitals.write().apply_removal(&outcome) {
                notifier.success("Deleted!", "Vital entry removed.");
            }
            if let Err(e) = outcome {
                if redirect_on_auth(&e, nav) {
                    return;
                }
                tracing::error!("Failed to delete vital {}: {}", id, e);
                notifier.error("Error", e.to_string());
            }
        });
    });

    let list = vitals.read();
    let current = form();

    rsx! {
        section {
            class: "vitals",
            h1 { class: "page-title", "Vitals" }

            form {
                class: "card vitals-form",
                onsubmit: handle_submit,

                input {
                    r#type: "text",
                    placeholder: "BP (e.g., 120/80)",
                    value: "{current.bp}",
                    oninput: move |evt: FormEvent| form.write().bp = evt.value(),
                }
                input {
                    r#type: "text",
                    placeholder: "Sugar (mg/dL)",
                    value: "{current.sugar}",
                    oninput: move |evt: FormEvent| form.write().sugar = evt.value(),
                }
                input {
                    r#type: "text",
                    placeholder: "Weight (kg)",
                    value: "{current.weight}",
                    oninput: move |evt: FormEvent| form.write().weight = evt.value(),
                }
                input {
                    r#type: "text",
                    placeholder: "Note (optional)",
                    value: "{current.note}",
                    oninput: move |evt: FormEvent| form.write().note = evt.value(),
                }
                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Saving..." } else { "Add Vitals" }
                }
            }

            h2 { class: "section-title", "History" }

            if list.is_loading() {
                LoadingState { label: "Loading vitals..." }
            }
            if let Some(err) = list.error() {
                ErrorState { message: err.to_string() }
            }
            if list.is_empty_loaded() {
                p { class: "state state--empty", "No vitals recorded yet." }
            }

            ul {
                class: "vital-list",
                for vital in list.items().iter() {
                    li {
                        key: "{vital.id}",
                        class: "vital-row",
                        div {
                            class: "vital-row-text",
                            span { class: "vital-date", "{vital.day()}" }
                            span { class: "vital-readings", "{vital.readings()}" }
                            if let Some(note) = vital.note.as_deref().filter(|n| !n.trim().is_empty()) {
                                span { class: "vital-note", "{note}" }
                            }
                        }
                        button {
                            class: "btn btn--danger",
                            disabled: deleting().as_deref() == Some(vital.id.as_str()),
                            onclick: {
                                let id = vital.id.clone();
                                move |_| delete_vital.call(id.clone())
                            },
                            Icon { icon: FaTrash, width: 14, height: 14 }
                        }
                    }
                }
            }
        }
    }
}
