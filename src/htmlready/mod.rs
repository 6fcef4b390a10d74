//! HTML tree transformer.
//!
//! Parses sentinel-wrapped HTML, walks the tree, and rewrites it in place:
//! text-node linkification and embed tokenization, anchor normalization and
//! phishing downgrade, iframe wrapping, and image source fixes. Collects a
//! [`TraversalState`] of everything it saw.
//!
//! Passes run in a fixed order, each collecting its targets before mutating,
//! so no pass walks a tree it is changing. The text pass runs first; anchors
//! and images it generates are then picked up by the element passes.

pub mod dom;
mod linkify;
pub mod phishing;
pub mod state;

use std::sync::LazyLock;

use kuchiki::NodeRef;
use log::debug;
use regex::Regex;

use crate::options::RenderOptions;
use crate::proxify;
use crate::recognize::{self, Provider};

pub use phishing::PHISHY_WARNING;
pub use state::TraversalState;

/// Transformed HTML plus the metadata collected along the way.
#[derive(Debug, Clone)]
pub struct HtmlReady {
    /// Sentinel-wrapped HTML.
    pub html: String,
    pub state: TraversalState,
}

/// Transform sentinel-wrapped HTML. Never panics on malformed input; a body
/// that cannot be parsed degrades to a literal `Error ...` string because this
/// runs inline in a render path.
pub fn html_ready(html: &str, opts: &RenderOptions) -> HtmlReady {
    let mut state = TraversalState::default();
    let doc = dom::parse_document(html);
    let Ok(body) = doc.select_first("body") else {
        debug!("htmlready: input produced no body element");
        return HtmlReady {
            html: "Error malformed html input".to_string(),
            state,
        };
    };
    let body = body.as_node().clone();

    record_tags(&body, &mut state);
    process_text_nodes(&body, &mut state);
    process_anchors(&body, &mut state);
    process_iframes(&body, &mut state);
    process_images(&body, opts, &mut state);

    HtmlReady {
        html: format!("<html>{}</html>", dom::inner_html(&body)),
        state,
    }
}

/// Element names present in the input, before any rewriting.
fn record_tags(body: &NodeRef, state: &mut TraversalState) {
    for node in body.descendants() {
        if node == *body {
            continue;
        }
        if let Some(el) = node.as_element() {
            state.htmltags.insert(el.name.local.to_string());
        }
    }
}

fn process_text_nodes(body: &NodeRef, state: &mut TraversalState) {
    let text_nodes: Vec<NodeRef> = body
        .descendants()
        .filter(|n| n.as_text().is_some() && !inside_literal_context(n))
        .collect();
    for node in text_nodes {
        let text = match node.as_text() {
            Some(cell) => cell.borrow().clone(),
            None => continue,
        };
        if let Some(replacement) = linkify::linkify(&text, state) {
            dom::replace_with_fragment(&node, &replacement);
        }
    }
}

/// Text inside anchors and code is never linkified.
fn inside_literal_context(node: &NodeRef) -> bool {
    node.ancestors().any(|a| {
        a.as_element()
            .map(|el| matches!(el.name.local.as_ref(), "a" | "code" | "pre"))
            .unwrap_or(false)
    })
}

fn process_anchors(body: &NodeRef, state: &mut TraversalState) {
    let anchors: Vec<NodeRef> = collect(body, "a");
    for node in anchors {
        let Some(el) = node.as_element() else { continue };
        let href = {
            let mut attrs = el.attributes.borrow_mut();
            let Some(href) = attrs.get("href").map(str::to_string) else {
                continue;
            };
            let fixed = ensure_scheme(&href);
            if fixed != href {
                attrs.insert("href", fixed.clone());
            }
            fixed
        };
        if !href.starts_with('/') && !href.starts_with('#') {
            state.links.insert(href.clone());
        }
        let text = node.text_contents();
        if phishing::looks_phishy(&text, &href) {
            let replacement = format!(
                r#"<div class="phishy" title="{}">{} / {}</div>"#,
                PHISHY_WARNING,
                html_escape::encode_text(text.trim()),
                html_escape::encode_text(&href),
            );
            dom::replace_with_fragment(&node, &replacement);
        }
    }
}

// Alphabetic head only: `example.com:8080` is an authority with a port, not
// a scheme-prefixed URL.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+:").expect("SCHEME_RE: hardcoded regex is valid"));

/// Hrefs with no scheme and no leading `/` or `#` get `https://` prepended.
/// A network-path reference (`//host/...`) names an arbitrary host and is
/// made explicit too, so downstream external-link classification sees it.
/// Hrefs that carry an explicit scheme are left for the sanitizer to judge;
/// prepending there would disguise a disallowed scheme as a path. A port
/// (`host:8080/x`) is not a scheme.
fn ensure_scheme(href: &str) -> String {
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if href.starts_with('#') || href.starts_with('/') {
        return href.to_string();
    }
    if SCHEME_RE.is_match(href) {
        return href.to_string();
    }
    format!("https://{href}")
}

fn process_iframes(body: &NodeRef, state: &mut TraversalState) {
    let iframes: Vec<NodeRef> = collect(body, "iframe");
    for node in iframes {
        let Some(el) = node.as_element() else { continue };
        let src = el
            .attributes
            .borrow()
            .get("src")
            .unwrap_or_default()
            .to_string();
        if let Some(m) = recognize::detect(Provider::YouTube, &src) {
            state.links.insert(m.url.clone());
            if let Some(thumb) = m.thumbnail {
                state.images.insert(thumb);
            }
        }
        if !parent_is_video_wrapper(&node) {
            if let Some(wrapper) = dom::fragment_nodes(r#"<div class="videoWrapper"></div>"#)
                .into_iter()
                .next()
            {
                node.insert_before(wrapper.clone());
                node.detach();
                wrapper.append(node.clone());
            }
        }
    }
}

fn parent_is_video_wrapper(node: &NodeRef) -> bool {
    node.parent()
        .and_then(|p| {
            p.as_element().map(|el| {
                el.attributes
                    .borrow()
                    .get("class")
                    .unwrap_or_default()
                    .split_whitespace()
                    .any(|c| c == "videoWrapper")
            })
        })
        .unwrap_or(false)
}

fn process_images(body: &NodeRef, opts: &RenderOptions, state: &mut TraversalState) {
    let images: Vec<NodeRef> = collect(body, "img");
    for node in images {
        let Some(el) = node.as_element() else { continue };
        let src = {
            let attrs = el.attributes.borrow();
            let Some(src) = attrs.get("src").map(str::to_string) else {
                continue;
            };
            src
        };

        let mut fixed = if let Some(ipfs) = proxify::normalize_ipfs_url(&src) {
            ipfs
        } else if src.starts_with("//") {
            format!("https:{src}")
        } else {
            src
        };
        state.images.insert(fixed.clone());

        if opts.hide_images {
            let replacement = format!(
                r#"<pre class="image-url-only">{}</pre>"#,
                html_escape::encode_text(&fixed)
            );
            dom::replace_with_fragment(&node, &replacement);
            continue;
        }

        if fixed.starts_with("http://") || fixed.starts_with("https://") {
            fixed = proxify::proxify_image_url(&fixed, proxify::DEFAULT_SIZE);
        }
        el.attributes.borrow_mut().insert("src", fixed);
    }
}

fn collect(body: &NodeRef, selector: &str) -> Vec<NodeRef> {
    body.select(selector)
        .map(|it| it.map(|el| el.as_node().clone()).collect())
        .unwrap_or_default()
}
