//! Vimeo URL detection and player URL construction.

use std::sync::LazyLock;

use regex::Regex;

use super::{EmbedMatch, Provider};

static VIMEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.)?vimeo\.com/(\d+)[^\s<>]*")
        .expect("VIMEO_RE: hardcoded regex is valid")
});

static EMBED_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://player\.vimeo\.com/video/(\d+)")
        .expect("EMBED_SRC_RE: hardcoded regex is valid")
});

/// Detect the first Vimeo video URL in `text`.
pub fn detect(text: &str) -> Option<EmbedMatch> {
    let caps = VIMEO_RE.captures(text)?;
    let whole = caps.get(0)?;
    Some(EmbedMatch {
        provider: Provider::Vimeo,
        id: caps.get(1)?.as_str().to_string(),
        url: whole.as_str().to_string(),
        start: None,
        thumbnail: None,
        span: (whole.start(), whole.end()),
    })
}

/// Accept a player src or a plain video URL pasted as an iframe src.
pub fn normalize_embed_src(src: &str) -> Option<String> {
    if let Some(caps) = EMBED_SRC_RE.captures(src) {
        return Some(player_src(&caps[1]));
    }
    let matched = detect(src)?;
    (matched.span.0 == 0).then(|| player_src(&matched.id))
}

/// Canonical player URL.
pub fn player_src(id: &str) -> String {
    format!("https://player.vimeo.com/video/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_video_url() {
        let m = detect("watch https://vimeo.com/124573082 soon").expect("match");
        assert_eq!(m.id, "124573082");
    }

    #[test]
    fn normalizes_player_src() {
        assert_eq!(
            normalize_embed_src("https://player.vimeo.com/video/1234?h=abc"),
            Some("https://player.vimeo.com/video/1234".to_string())
        );
        assert!(normalize_embed_src("https://vimeo.example/video/1234").is_none());
    }
}
