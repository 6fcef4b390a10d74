//! Embed token expansion.
//!
//! Tokens of the shape `~~~ embed:<id> <provider> [start] ~~~` are inserted
//! by the tree transformer and survive sanitization as plain text because
//! they contain no markup and no URL. This stage runs last, replacing each
//! token with provider player markup. Each token resolves independently:
//! a payload that cannot be resolved stays in the output as inert text.

use std::sync::LazyLock;

use regex::Regex;

use crate::recognize::providers::{self, Provider};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"~~~ embed:(\S+) (youtube|vimeo|twitch|dtube|threespeak)(?: (\d+))? ~~~")
        .expect("TOKEN_RE: hardcoded regex is valid")
});

// Tokens reach this stage from sanitized text, which an author controls.
// Only ids from this charset go into player URLs.
static ID_OK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._/-]+$").expect("ID_OK_RE: hardcoded regex is valid")
});

static LITERAL_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:code|pre)\b[^>]*>").expect("LITERAL_TAG_RE: hardcoded regex is valid")
});

/// One parsed embed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedToken {
    pub provider: Provider,
    pub id: String,
    pub start: Option<u32>,
}

/// Token text for a recognized media URL. The URL itself is deliberately not
/// part of the payload so later linkification passes cannot match inside it.
pub fn embed_token(provider: Provider, id: &str, start: Option<u32>) -> String {
    match start {
        Some(s) => format!("~~~ embed:{id} {} {s} ~~~", provider.id()),
        None => format!("~~~ embed:{id} {} ~~~", provider.id()),
    }
}

/// Replace every resolvable embed token in `html` with player markup, in
/// document order. Unresolvable tokens, and tokens written inside `<code>`
/// or `<pre>` content, are left untouched.
pub fn expand_embeds(html: &str) -> String {
    let literal = literal_ranges(html);
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for caps in TOKEN_RE.captures_iter(html) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        if literal.iter().any(|(s, e)| whole.start() >= *s && whole.start() < *e) {
            continue;
        }
        out.push_str(&html[cursor..whole.start()]);
        match parse_token(&caps).and_then(|t| render_embed(&t)) {
            Some(markup) => out.push_str(&markup),
            None => out.push_str(whole.as_str()),
        }
        cursor = whole.end();
    }
    out.push_str(&html[cursor..]);
    out
}

/// Byte ranges of `<code>`/`<pre>` regions. Works on serialized tree output,
/// so open and close tags are balanced; an unclosed open tag extends its
/// region to the end of the string.
fn literal_ranges(html: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for m in LITERAL_TAG_RE.find_iter(html) {
        if m.as_str().starts_with("</") {
            if depth > 0 {
                depth -= 1;
                if depth == 0 {
                    ranges.push((start, m.end()));
                }
            }
        } else {
            if depth == 0 {
                start = m.start();
            }
            depth += 1;
        }
    }
    if depth > 0 {
        ranges.push((start, html.len()));
    }
    ranges
}

fn parse_token(caps: &regex::Captures<'_>) -> Option<EmbedToken> {
    let id = caps.get(1)?.as_str();
    if !ID_OK_RE.is_match(id) {
        return None;
    }
    Some(EmbedToken {
        provider: Provider::from_id(caps.get(2)?.as_str())?,
        id: id.to_string(),
        start: caps.get(3).and_then(|m| m.as_str().parse().ok()),
    })
}

fn render_embed(token: &EmbedToken) -> Option<String> {
    let src = providers::player_src(token.provider, &token.id, token.start)?;
    let sandbox = match token.provider {
        Provider::DTube => r#" sandbox="allow-scripts allow-same-origin""#,
        _ => "",
    };
    Some(format!(
        r#"<div class="videoWrapper"><iframe width="640" height="360" src="{src}" frameborder="0" allowfullscreen{sandbox}></iframe></div>"#
    ))
}
