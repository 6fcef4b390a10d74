//! Markdown/HTML rendering and sanitization for Steem post bodies.
//!
//! Takes untrusted, blockchain-stored Markdown (possibly containing raw HTML,
//! scripts, iframes, and media links) and produces safe, normalized markup:
//!
//! 1. [`markdown`] renders the body to sentinel-wrapped HTML (or passes
//!    already-HTML bodies through), stripping comments.
//! 2. [`htmlready`] walks the tree: linkifies mentions, hashtags, and URLs,
//!    tokenizes recognized media URLs, wraps iframes, fixes image sources,
//!    and downgrades phishing-looking anchors.
//! 3. [`sanitize`] strips everything outside the allow-list and applies
//!    per-tag transforms.
//! 4. [`embedder`] expands the surviving embed tokens into player markup.
//!
//! [`history`] is a parallel pipeline reconstructing edit histories from
//! diff-match-patch bodies and rendering inline diffs.
//!
//! Every stage is a pure, synchronous, in-memory transformation; concurrent
//! renders share nothing but compiled regexes.

pub mod embedder;
pub mod error;
pub mod history;
pub mod htmlready;
pub mod markdown;
pub mod options;
pub mod proxify;
pub mod recognize;
pub mod sanitize;

use log::warn;

pub use crate::history::{build_versions, diff_html, HistoryVersion, RawHistoryEntry};
pub use crate::htmlready::TraversalState;
pub use crate::options::RenderOptions;

/// Full render output: markup plus traversal metadata and recoverable errors.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Final displayable HTML, no sentinel wrapper.
    pub html: String,
    /// Hashtags, mentions, images, and links seen during traversal.
    pub state: TraversalState,
    /// Recoverable sanitize errors (rejected iframes, broken image sources).
    pub errors: Vec<error::SanitizeError>,
}

/// Render an untrusted body to safe HTML.
pub fn render(body: &str, opts: &RenderOptions) -> String {
    render_full(body, opts).html
}

/// Render an untrusted body, also returning traversal metadata and errors.
pub fn render_full(body: &str, opts: &RenderOptions) -> Rendered {
    let rendered = markdown::render_markdown(body, opts);
    let ready = htmlready::html_ready(&rendered, opts);

    let (clean, errors) = if opts.allow_dangerous_html {
        warn!("allowDangerousHTML is set, skipping sanitization");
        (strip_sentinel(&ready.html), Vec::new())
    } else {
        let sanitized = sanitize::sanitize_html(&ready.html, opts);
        (sanitized.html, sanitized.errors)
    };

    Rendered {
        html: embedder::expand_embeds(&clean),
        state: ready.state,
        errors,
    }
}

fn strip_sentinel(html: &str) -> String {
    html.strip_prefix("<html>")
        .and_then(|h| h.strip_suffix("</html>"))
        .unwrap_or(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paragraph_renders_cleanly() {
        let out = render_full("Hello world", &RenderOptions::default());
        assert_eq!(out.html, "<p>Hello world</p>");
        assert!(out.errors.is_empty());
    }

    #[test]
    fn script_never_survives() {
        let out = render("<script>alert(1)</script>", &RenderOptions::default());
        assert!(!out.to_ascii_lowercase().contains("<script"));
    }

    #[test]
    fn youtube_url_becomes_player_markup() {
        let out = render(
            "watch this https://youtu.be/dQw4w9WgXcQ?t=30s",
            &RenderOptions::default(),
        );
        assert!(out.contains("youtube.com/embed/dQw4w9WgXcQ"));
        assert!(out.contains("start=30"));
        assert!(!out.contains("~~~"));
    }

    #[test]
    fn dangerous_html_mode_skips_sanitization() {
        let body = "<html><p><u>kept</u></p></html>";
        let safe = render(body, &RenderOptions::default());
        assert!(!safe.contains("<u>"));
        let dangerous = render(
            body,
            &RenderOptions {
                allow_dangerous_html: true,
                ..RenderOptions::default()
            },
        );
        assert!(dangerous.contains("<u>kept</u>"));
    }

    #[test]
    fn traversal_state_is_exposed() {
        let out = render_full(
            "by @validuser about #steem",
            &RenderOptions::default(),
        );
        assert!(out.state.usertags.contains("validuser"));
        assert!(out.state.hashtags.contains("steem"));
    }
}
