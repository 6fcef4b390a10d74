//! Text-node substitution chain.
//!
//! Runs on the plain text of a single text node and produces replacement HTML
//! when anything matched. Two phases, order fixed:
//!
//! 1. Embed providers (YouTube, Vimeo, Twitch, DTube, 3Speak), each scanning
//!    the previous phase's output. A recognized media URL is replaced by an
//!    embed token that deliberately omits the URL, so later phases cannot
//!    re-match inside it.
//! 2. Linkification of mentions, hashtags, and bare URLs. Internal post and
//!    profile URLs become app-relative anchors with simplified text; image
//!    URLs become `<img>` elements; everything else becomes a plain anchor.

use std::sync::LazyLock;

use regex::Regex;

use crate::embedder::embed_token;
use crate::recognize::{
    self, find_hashtags, find_mentions, find_urls, parse_internal_link, replace_old_domains,
    Provider,
};
use crate::htmlready::state::TraversalState;

static IMAGE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:jpe?g|png|gif|webp|svg)(?:\?\S*)?$")
        .expect("IMAGE_URL_RE: hardcoded regex is valid")
});

/// Substitute embeds, mentions, hashtags, and URLs in `text`. Returns `None`
/// when nothing matched and the node can be left alone.
pub fn linkify(text: &str, state: &mut TraversalState) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let (tokenized, embedded) = substitute_embeds(text, state);
    let (html, linked) = substitute_links(&tokenized, state);

    (embedded || linked).then_some(html)
}

/// Replace every recognized provider URL with an embed token, in fixed
/// provider order, each provider scanning the previous output.
fn substitute_embeds(text: &str, state: &mut TraversalState) -> (String, bool) {
    let mut out = text.to_string();
    let mut changed = false;
    for provider in Provider::DETECTION_ORDER {
        // Tokens carry no URL, so the loop always shrinks the matchable text.
        while let Some(m) = recognize::detect(provider, &out) {
            state.links.insert(m.url.clone());
            if let Some(thumb) = &m.thumbnail {
                state.images.insert(thumb.clone());
            }
            let token = embed_token(provider, &m.id, m.start);
            out = format!("{}{}{}", &out[..m.span.0], token, &out[m.span.1..]);
            changed = true;
        }
    }
    (out, changed)
}

#[derive(Debug)]
enum Matched {
    Url(String),
    Mention(String),
    Hashtag(String),
}

fn substitute_links(text: &str, state: &mut TraversalState) -> (String, bool) {
    let mut matches: Vec<(usize, usize, Matched)> = Vec::new();
    for u in find_urls(text) {
        matches.push((u.start, u.end, Matched::Url(u.url)));
    }
    for m in find_mentions(text) {
        matches.push((m.start, m.end, Matched::Mention(m.name)));
    }
    for h in find_hashtags(text) {
        matches.push((h.start, h.end, Matched::Hashtag(h.tag)));
    }
    if matches.is_empty() {
        return (escape(text), false);
    }
    matches.sort_by_key(|&(start, end, _)| (start, std::cmp::Reverse(end)));

    let mut out = String::with_capacity(text.len() * 2);
    let mut cursor = 0;
    for (start, end, matched) in matches {
        if start < cursor {
            continue;
        }
        out.push_str(&escape(&text[cursor..start]));
        let visible = &text[start..end];
        match matched {
            Matched::Url(url) => out.push_str(&render_url(&url, state)),
            Matched::Mention(name) => {
                state.usertags.insert(name.clone());
                out.push_str(&format!(
                    r#"<a href="/@{name}">{}</a>"#,
                    escape(visible)
                ));
            }
            Matched::Hashtag(tag) => {
                state.hashtags.insert(tag.clone());
                out.push_str(&format!(
                    r#"<a href="/trending/{tag}">{}</a>"#,
                    escape(visible)
                ));
            }
        }
        cursor = end;
    }
    out.push_str(&escape(&text[cursor..]));
    (out, true)
}

fn render_url(url: &str, state: &mut TraversalState) -> String {
    let rewritten = replace_old_domains(url);

    if let Some(internal) = parse_internal_link(&rewritten) {
        state.links.insert(rewritten);
        return format!(
            r#"<a href="{}">{}</a>"#,
            escape_attr(&internal.to_path()),
            escape(&internal.anchor_text())
        );
    }

    if IMAGE_URL_RE.is_match(&rewritten) {
        // The image pass downstream handles proxying and hide-images mode.
        return format!(r#"<img src="{}">"#, escape_attr(&rewritten));
    }

    state.links.insert(rewritten.clone());
    format!(
        r#"<a href="{}">{}</a>"#,
        escape_attr(&rewritten),
        escape(&rewritten)
    )
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn escape_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
