//! Allow-list HTML sanitization.
//!
//! Strips every tag and attribute not on the explicit allow-list, enforces
//! URL schemes, and applies per-tag transforms (iframe provider validation,
//! image redaction and https forcing, external-link marking, div class
//! filtering, table cell style filtering, span background conversion).
//!
//! Unknown tags are unwrapped in place so their text content survives; the
//! drop-subtree set ([`policy::DROP_SUBTREE_TAGS`]) is removed entirely. The
//! policy is idempotent: sanitizing already-sanitized output is a no-op.

pub mod policy;

use std::sync::LazyLock;

use kuchiki::NodeRef;
use log::error;
use regex::Regex;
use url::Url;

use crate::error::SanitizeError;
use crate::htmlready::{dom, PHISHY_WARNING};
use crate::options::RenderOptions;
use crate::proxify;
use crate::recognize::{is_app_host, is_trusted_host, replace_old_domains, validate_iframe_src};

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*script").expect("SCRIPT_RE: hardcoded regex is valid")
});

static CELL_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*text-align:\s*(?:left|right|center)\s*;?\s*$")
        .expect("CELL_STYLE_RE: hardcoded regex is valid")
});

static SPAN_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^background-image:url\(https://[^()\s"'<>]+\)$"#)
        .expect("SPAN_STYLE_RE: hardcoded regex is valid")
});

/// Sanitized markup plus recoverable per-node errors the caller may surface.
#[derive(Debug, Clone, Default)]
pub struct Sanitized {
    /// Clean HTML, no sentinel wrapper. Empty when the unsafe-content guard
    /// fired.
    pub html: String,
    pub errors: Vec<SanitizeError>,
}

/// Sanitize sentinel-wrapped (or bare) HTML against the allow-list.
pub fn sanitize_html(html: &str, opts: &RenderOptions) -> Sanitized {
    let mut errors = Vec::new();
    let doc = dom::parse_document(html);
    let Ok(body) = doc.select_first("body") else {
        return Sanitized {
            html: String::new(),
            errors: vec![SanitizeError("malformed html input".to_string())],
        };
    };
    let body = body.as_node().clone();

    let comments: Vec<NodeRef> = body
        .descendants()
        .filter(|n| n.as_comment().is_some())
        .collect();
    for comment in comments {
        comment.detach();
    }

    let elements: Vec<NodeRef> = body
        .descendants()
        .filter(|n| *n != body && n.as_element().is_some())
        .collect();
    for node in elements {
        // Skip nodes whose subtree was already dropped.
        if !node.ancestors().any(|a| a == body) {
            continue;
        }
        sanitize_element(&node, opts, &mut errors);
    }

    let out = dom::inner_html(&body);
    // Structurally impossible given the allow-list; if it ever fires the
    // policy itself is the bug. Never display the content.
    if SCRIPT_RE.is_match(&out) {
        error!("script tag survived sanitization, dropping output");
        errors.push(SanitizeError(
            "unsafe content detected after sanitization".to_string(),
        ));
        return Sanitized {
            html: String::new(),
            errors,
        };
    }
    Sanitized { html: out, errors }
}

fn sanitize_element(node: &NodeRef, opts: &RenderOptions, errors: &mut Vec<SanitizeError>) {
    let Some(el) = node.as_element() else { return };
    let tag = el.name.local.to_string();

    if !policy::is_allowed_tag(&tag) {
        if policy::drops_subtree(&tag) {
            node.detach();
        } else {
            unwrap_node(node);
        }
        return;
    }

    filter_attributes(node, &tag);

    match tag.as_str() {
        "iframe" => transform_iframe(node, errors),
        "img" => transform_img(node, opts, errors),
        "div" => transform_div(node),
        "td" | "th" => transform_cell(node),
        "a" => transform_anchor(node, opts),
        "span" => transform_span(node),
        _ => {}
    }
}

/// Replace a node with its own children, preserving order.
fn unwrap_node(node: &NodeRef) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        child.detach();
        node.insert_before(child);
    }
    node.detach();
}

fn filter_attributes(node: &NodeRef, tag: &str) {
    let Some(el) = node.as_element() else { return };
    let allowed = policy::allowed_attrs(tag);
    let mut attrs = el.attributes.borrow_mut();

    let to_remove: Vec<String> = attrs
        .map
        .keys()
        .filter(|name| !allowed.contains(&name.local.as_ref()))
        .map(|name| name.local.to_string())
        .collect();
    for name in to_remove {
        attrs.remove(name.as_str());
    }

    for name in ["href", "src"] {
        let bad = attrs
            .get(name)
            .map(|v| !policy::url_scheme_ok(v))
            .unwrap_or(false);
        if bad {
            attrs.remove(name);
        }
    }
    let srcset_bad = attrs
        .get("srcset")
        .map(|v| {
            v.split(',')
                .filter_map(|entry| entry.split_whitespace().next())
                .any(|url| !policy::url_scheme_ok(url))
        })
        .unwrap_or(false);
    if srcset_bad {
        attrs.remove("srcset");
    }
}

fn transform_iframe(node: &NodeRef, errors: &mut Vec<SanitizeError>) {
    let Some(el) = node.as_element() else { return };
    let src = el
        .attributes
        .borrow()
        .get("src")
        .unwrap_or_default()
        .to_string();

    match validate_iframe_src(&src, true) {
        Some(valid) => {
            let mut attrs = el.attributes.borrow_mut();
            attrs.insert("src", valid.url);
            attrs.insert("width", valid.width.to_string());
            attrs.insert("height", valid.height.to_string());
            attrs.insert("frameborder", "0".to_string());
            attrs.insert("allowfullscreen", String::new());
            match valid.sandbox {
                Some(sandbox) => {
                    attrs.insert("sandbox", sandbox.to_string());
                }
                None => {
                    attrs.remove("sandbox");
                }
            }
        }
        None => {
            errors.push(SanitizeError(format!("Invalid iframe src: {src}")));
            let replacement = format!(
                "<div>(Unsupported {})</div>",
                html_escape::encode_text(&src)
            );
            dom::replace_with_fragment(node, &replacement);
        }
    }
}

fn transform_img(node: &NodeRef, opts: &RenderOptions, errors: &mut Vec<SanitizeError>) {
    if opts.no_image {
        dom::replace_with_fragment(
            node,
            &html_escape::encode_text(policy::NO_IMAGE_TEXT),
        );
        return;
    }
    let Some(el) = node.as_element() else { return };
    let mut attrs = el.attributes.borrow_mut();

    let src = attrs.get("src").unwrap_or_default().to_string();
    let absolute = src.starts_with("https://")
        || src.starts_with("http://")
        || src.starts_with("//")
        || src.starts_with('/');
    let mut src = if absolute {
        src
    } else {
        errors.push(SanitizeError(format!("Invalid image src: {src}")));
        policy::BROKEN_IMAGE_SRC.to_string()
    };
    if let Some(rest) = src.strip_prefix("http://") {
        src = format!("https://{rest}");
    } else if let Some(rest) = src.strip_prefix("//") {
        src = format!("https://{rest}");
    }
    if let Some(doubled) = proxify::double_size_src(&src) {
        attrs.insert("srcset", format!("{doubled} 2x"));
    }
    attrs.insert("src", src);
}

fn transform_div(node: &NodeRef) {
    let Some(el) = node.as_element() else { return };
    let mut attrs = el.attributes.borrow_mut();

    let kept: Vec<&str> = attrs
        .get("class")
        .unwrap_or_default()
        .split_whitespace()
        .filter(|c| policy::ALLOWED_DIV_CLASSES.contains(c))
        .collect();
    let phishy = kept.contains(&"phishy");
    let kept = kept.join(" ");
    if kept.is_empty() {
        attrs.remove("class");
    } else {
        attrs.insert("class", kept);
    }

    // An arbitrary tooltip is an attribute-injection vector; only the exact
    // phishing warning survives.
    let title_ok = phishy && attrs.get("title") == Some(PHISHY_WARNING);
    if !title_ok {
        attrs.remove("title");
    }
}

fn transform_cell(node: &NodeRef) {
    let Some(el) = node.as_element() else { return };
    let mut attrs = el.attributes.borrow_mut();
    let style_ok = attrs
        .get("style")
        .map(|s| CELL_STYLE_RE.is_match(s))
        .unwrap_or(false);
    if !style_ok {
        attrs.remove("style");
    }
}

fn transform_anchor(node: &NodeRef, opts: &RenderOptions) {
    let Some(el) = node.as_element() else { return };
    let mut attrs = el.attributes.borrow_mut();
    let Some(href) = attrs.get("href").map(str::to_string) else {
        return;
    };
    // Network-path references name an arbitrary host; make the scheme
    // explicit so external classification cannot be dodged.
    let href = match href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => href,
    };
    let href = replace_old_domains(&href);
    attrs.insert("href", href.clone());

    if !is_external(&href) {
        return;
    }
    attrs.insert("target", "_blank".to_string());
    let rel = if opts.high_quality_post {
        "noopener noreferrer"
    } else {
        "nofollow noopener noreferrer"
    };
    attrs.insert("rel", rel.to_string());
    attrs.insert("title", policy::EXTERNAL_LINK_TITLE.to_string());

    let class = attrs.get("class").unwrap_or_default().to_string();
    if !class
        .split_whitespace()
        .any(|c| c == policy::EXTERNAL_LINK_CLASS)
    {
        let merged = if class.is_empty() {
            policy::EXTERNAL_LINK_CLASS.to_string()
        } else {
            format!("{class} {}", policy::EXTERNAL_LINK_CLASS)
        };
        attrs.insert("class", merged);
    }
}

/// Absolute http(s) URL pointing at neither the app nor a trusted media host.
fn is_external(href: &str) -> bool {
    if !href.starts_with("http://") && !href.starts_with("https://") {
        return false;
    }
    let Ok(parsed) = Url::parse(href) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => !is_app_host(host) && !is_trusted_host(host),
        None => false,
    }
}

fn transform_span(node: &NodeRef) {
    let Some(el) = node.as_element() else { return };
    let mut attrs = el.attributes.borrow_mut();

    let bg = attrs.get("data-bg").map(str::to_string);
    attrs.remove("data-bg");
    if let Some(bg) = bg {
        if bg.starts_with("https://") && policy::url_scheme_ok(&bg) {
            attrs.insert("style", format!("background-image:url({bg})"));
        }
    }
    let style_ok = attrs
        .get("style")
        .map(|s| SPAN_STYLE_RE.is_match(s))
        .unwrap_or(false);
    if !style_ok {
        attrs.remove("style");
    }
}
