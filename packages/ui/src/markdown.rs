//! Rendering of AI-generated explanation text.
//!
//! Summaries and explanations come back from the backend as loosely formatted
//! Markdown (bullets, bold terms). They are rendered to HTML with
//! `pulldown-cmark`; raw HTML inside the text is shown as text, never
//! interpreted.

use dioxus::prelude::*;
use pulldown_cmark::{html, Event, Options, Parser};

/// Render `text` to HTML with embedded HTML neutralised.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[component]
pub fn Markdown(text: String, #[props(default = "".to_string())] class: String) -> Element {
    let rendered = render_markdown(&text);

    rsx! {
        div {
            class: "markdown {class}",
            dangerous_inner_html: "{rendered}",
        }
    }
}
