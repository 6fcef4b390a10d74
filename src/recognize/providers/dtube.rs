//! DTube URL detection and player URL construction.
//!
//! Media ids are `author/permlink` pairs.

use std::sync::LazyLock;

use regex::Regex;

use super::{EmbedMatch, Provider};

static DTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:emb\.)?d\.tube/(?:#!/)?v/([a-z0-9.-]+/[\w-]+)")
        .expect("DTUBE_RE: hardcoded regex is valid")
});

static EMBED_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://emb\.d\.tube/#!/([a-z0-9.-]+/[\w-]+)")
        .expect("EMBED_SRC_RE: hardcoded regex is valid")
});

/// Detect the first DTube video URL in `text`.
pub fn detect(text: &str) -> Option<EmbedMatch> {
    let caps = DTUBE_RE.captures(text)?;
    let whole = caps.get(0)?;
    Some(EmbedMatch {
        provider: Provider::DTube,
        id: caps.get(1)?.as_str().to_string(),
        url: whole.as_str().to_string(),
        start: None,
        thumbnail: None,
        span: (whole.start(), whole.end()),
    })
}

/// Accept a player src or a watch URL pasted as an iframe src.
pub fn normalize_embed_src(src: &str) -> Option<String> {
    if let Some(caps) = EMBED_SRC_RE.captures(src) {
        return Some(player_src(&caps[1]));
    }
    let matched = detect(src)?;
    (matched.span.0 == 0).then(|| player_src(&matched.id))
}

/// Canonical player URL for an `author/permlink` id.
pub fn player_src(id: &str) -> String {
    format!("https://emb.d.tube/#!/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_watch_url() {
        let m = detect("https://d.tube/#!/v/alice/my-video-permlink").expect("match");
        assert_eq!(m.id, "alice/my-video-permlink");
    }

    #[test]
    fn normalizes_embed_src() {
        assert_eq!(
            normalize_embed_src("https://emb.d.tube/#!/alice/my-video"),
            Some("https://emb.d.tube/#!/alice/my-video".to_string())
        );
        assert!(normalize_embed_src("https://d.tube.evil.example/#!/v/a/b").is_none());
    }
}
