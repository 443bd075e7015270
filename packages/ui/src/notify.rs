//! Notification layer.
//!
//! Views report outcomes through a [`Notifier`] taken from context:
//!
//! - [`Notifier::notify`] shows a notice the user dismisses (or that dismisses
//!   itself after [`Notice::dismiss_after`]).
//! - [`Notifier::confirm`] shows a notice with a confirm button and resolves to
//!   `true` only when that button is pressed. Destructive actions await it
//!   before sending anything.
//!
//! The queue itself is plain data ([`NoticeQueue`]); [`NotificationHost`]
//! renders it. Notices stack in arrival order, newest on top.

use dioxus::dioxus_core::spawn_forever;
use dioxus::prelude::*;
use futures::channel::oneshot;

use crate::icons::{FaCircleCheck, FaCircleExclamation, FaTriangleExclamation};
use crate::Icon;

const NOTIFY_CSS: Asset = asset!("/assets/styling/notify.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Error => "notice notice--error",
            NoticeKind::Warning => "notice notice--warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    /// Label of the confirm button. `None` renders a plain "OK".
    pub confirm_label: Option<String>,
    pub cancel_label: String,
    pub dismiss_after_ms: Option<u32>,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            confirm_label: None,
            cancel_label: "Cancel".to_string(),
            dismiss_after_ms: None,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, title, message)
    }

    pub fn with_confirm(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    pub fn with_cancel(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    pub fn dismiss_after(mut self, ms: u32) -> Self {
        self.dismiss_after_ms = Some(ms);
        self
    }

    /// The standard "are you sure" prompt in front of a delete.
    pub fn confirm_delete(message: impl Into<String>) -> Self {
        Self::warning("Are you sure?", message).with_confirm("Yes, delete it!")
    }
}

struct Entry {
    id: u64,
    notice: Notice,
    responder: Option<oneshot::Sender<bool>>,
}

/// Pending notices, oldest first.
#[derive(Default)]
pub struct NoticeQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl NoticeQueue {
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.insert(notice, None)
    }

    /// Queue a notice whose answer is delivered through the returned receiver.
    pub fn push_confirm(&mut self, notice: Notice) -> (u64, oneshot::Receiver<bool>) {
        let (tx, rx) = oneshot::channel();
        let id = self.insert(notice, Some(tx));
        (id, rx)
    }

    fn insert(&mut self, notice: Notice, responder: Option<oneshot::Sender<bool>>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            notice,
            responder,
        });
        id
    }

    /// Close notice `id`, answering its confirm prompt if it has one.
    /// Returns whether the notice was still open.
    pub fn resolve(&mut self, id: u64, confirmed: bool) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let entry = self.entries.remove(pos);
        if let Some(tx) = entry.responder {
            // The waiting view may be gone already
            let _ = tx.send(confirmed);
        }
        true
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        self.resolve(id, false)
    }

    pub fn visible(&self) -> Vec<(u64, Notice)> {
        self.entries
            .iter()
            .map(|e| (e.id, e.notice.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle views use to raise notices.
#[derive(Clone, Copy, PartialEq)]
pub struct Notifier {
    queue: Signal<NoticeQueue>,
}

impl Notifier {
    pub fn notify(&self, notice: Notice) {
        let mut queue = self.queue;
        let dismiss_after = notice.dismiss_after_ms;
        let id = queue.write().push(notice);
        if let Some(ms) = dismiss_after {
            let _ = spawn_forever(async move {
                sleep_ms(ms).await;
                queue.write().dismiss(id);
            });
        }
    }

    pub fn success(&self, title: &str, message: impl Into<String>) {
        self.notify(Notice::success(title, message));
    }

    pub fn error(&self, title: &str, message: impl Into<String>) {
        self.notify(Notice::error(title, message));
    }

    /// Show `notice` with a confirm button and wait for the answer.
    /// Anything other than pressing confirm counts as `false`.
    pub async fn confirm(&self, notice: Notice) -> bool {
        let mut queue = self.queue;
        let (_, rx) = queue.write().push_confirm(notice);
        rx.await.unwrap_or(false)
    }

    fn resolve(&self, id: u64, confirmed: bool) {
        let mut queue = self.queue;
        queue.write().resolve(id, confirmed);
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

/// Installs the [`Notifier`] and renders open notices above `children`.
#[component]
pub fn NotificationHost(children: Element) -> Element {
    let queue = use_signal(NoticeQueue::default);
    let notifier = use_context_provider(|| Notifier { queue });
    let open = queue.read().visible();

    rsx! {
        document::Stylesheet { href: NOTIFY_CSS }

        {children}

        for (id, notice) in open {
            NoticeCard {
                key: "{id}",
                notice: notice,
                on_resolve: move |confirmed: bool| notifier.resolve(id, confirmed),
            }
        }
    }
}

/// A full-screen overlay that centers one notice.
/// Clicking outside the card counts as cancel.
#[component]
fn NoticeCard(notice: Notice, on_resolve: EventHandler<bool>) -> Element {
    let kind = notice.kind;

    rsx! {
        div {
            class: "notice-overlay",
            onclick: move |_| on_resolve.call(false),
            div {
                class: kind.class(),
                role: "alertdialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                div {
                    class: "notice-icon",
                    {match kind {
                        NoticeKind::Success => rsx! { Icon { icon: FaCircleCheck, width: 32, height: 32 } },
                        NoticeKind::Error => rsx! { Icon { icon: FaCircleExclamation, width: 32, height: 32 } },
                        NoticeKind::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 32, height: 32 } },
                    }}
                }
                h3 { class: "notice-title", "{notice.title}" }
                if !notice.message.is_empty() {
                    p { class: "notice-message", "{notice.message}" }
                }

                div {
                    class: "notice-actions",
                    if let Some(label) = notice.confirm_label.clone() {
                        button {
                            class: "notice-btn notice-btn--primary",
                            onclick: move |_| on_resolve.call(true),
                            "{label}"
                        }
                        button {
                            class: "notice-btn",
                            onclick: move |_| on_resolve.call(false),
                            "{notice.cancel_label}"
                        }
                    } else if notice.dismiss_after_ms.is_none() {
                        button {
                            class: "notice-btn notice-btn--primary",
                            onclick: move |_| on_resolve.call(false),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}
