//! 3Speak URL detection and player URL construction.
//!
//! Media ids are `account/permlink` pairs; the site has lived on several
//! TLDs over the years, all of which are accepted on detection.

use std::sync::LazyLock;

use regex::Regex;

use super::{EmbedMatch, Provider};

static THREESPEAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.)?3speak\.(?:tv|online|co)/watch\?v=([a-z0-9.-]+/[\w-]+)")
        .expect("THREESPEAK_RE: hardcoded regex is valid")
});

static EMBED_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?3speak\.(?:tv|online|co)/embed\?v=([a-z0-9.-]+/[\w-]+)")
        .expect("EMBED_SRC_RE: hardcoded regex is valid")
});

/// Detect the first 3Speak watch URL in `text`.
pub fn detect(text: &str) -> Option<EmbedMatch> {
    let caps = THREESPEAK_RE.captures(text)?;
    let whole = caps.get(0)?;
    Some(EmbedMatch {
        provider: Provider::ThreeSpeak,
        id: caps.get(1)?.as_str().to_string(),
        url: whole.as_str().to_string(),
        start: None,
        thumbnail: None,
        span: (whole.start(), whole.end()),
    })
}

/// Accept an embed src or a watch URL pasted as an iframe src.
pub fn normalize_embed_src(src: &str) -> Option<String> {
    if let Some(caps) = EMBED_SRC_RE.captures(src) {
        return Some(player_src(&caps[1]));
    }
    let matched = detect(src)?;
    (matched.span.0 == 0).then(|| player_src(&matched.id))
}

/// Canonical player URL for an `account/permlink` id.
pub fn player_src(id: &str) -> String {
    format!("https://3speak.tv/embed?v={id}")
}
