//! Markdown-to-HTML rendering.
//!
//! Converts a raw post body to HTML. Bodies that are already HTML (wrapped in
//! a literal `<html>...</html>` sentinel, or shaped like `<p>...</p>`) skip
//! Markdown parsing entirely. HTML comments are stripped unconditionally
//! before any other processing. Raw HTML passes through the Markdown renderer
//! untouched: the sanitizer downstream is the safety boundary, not this step.
//!
//! Output is always wrapped in the `<html>...</html>` sentinel so both code
//! paths hand the tree transformer one shape.

pub mod spoiler;

use std::sync::LazyLock;

use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;

use crate::options::RenderOptions;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->").expect("COMMENT_RE: hardcoded regex is valid")
});

const COMMENT_PLACEHOLDER: &str = "(html comment removed)";

/// Does the body look like pre-rendered HTML rather than Markdown?
fn is_html_body(trimmed: &str) -> bool {
    (trimmed.starts_with("<html>") && trimmed.ends_with("</html>"))
        || (trimmed.starts_with("<p>") && trimmed.ends_with("</p>"))
}

/// Render a raw body to sentinel-wrapped HTML.
pub fn render_markdown(body: &str, opts: &RenderOptions) -> String {
    // Comment stripping happens before anything else looks at the text;
    // comments are a classic vehicle for smuggling markup past later stages.
    let stripped = COMMENT_RE.replace_all(body, COMMENT_PLACEHOLDER);
    let trimmed = stripped.trim();

    if is_html_body(trimmed) {
        return wrap_sentinel(trimmed);
    }

    let preprocessed = spoiler::preprocess_spoilers(trimmed);

    let mut md_opts = Options::empty();
    md_opts.insert(Options::ENABLE_TABLES);
    md_opts.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(&preprocessed, md_opts);
    let mut rendered = String::with_capacity(preprocessed.len() * 2);
    if opts.breaks {
        let events = parser.map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });
        html::push_html(&mut rendered, events);
    } else {
        html::push_html(&mut rendered, parser);
    }

    wrap_sentinel(rendered.trim())
}

fn wrap_sentinel(html: &str) -> String {
    if html.starts_with("<html>") && html.ends_with("</html>") {
        html.to_string()
    } else {
        format!("<html>{html}</html>")
    }
}
