//! YouTube URL detection and player URL construction.

use std::sync::LazyLock;

use regex::Regex;

use super::{EmbedMatch, Provider};

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:https?:)?//(?:www\.|m\.)?(?:youtube\.com/(?:watch\?[^\s<>]*?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})[^\s<>]*",
    )
    .expect("YOUTUBE_RE: hardcoded regex is valid")
});

static START_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&#](?:t|start)=(\d+)s?").expect("START_TIME_RE: hardcoded regex is valid")
});

static EMBED_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?:)?//(?:www\.)?youtube(?:-nocookie)?\.com/embed/([A-Za-z0-9_-]{11})",
    )
    .expect("EMBED_SRC_RE: hardcoded regex is valid")
});

/// Preview thumbnail for a video id.
pub fn thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/0.jpg")
}

/// Detect the first YouTube watch/short/embed URL in `text`, extracting the
/// 11-character video id and any `t=`/`start=` offset in seconds.
pub fn detect(text: &str) -> Option<EmbedMatch> {
    let caps = YOUTUBE_RE.captures(text)?;
    let whole = caps.get(0)?;
    let id = caps.get(1)?.as_str().to_string();
    let start = START_TIME_RE
        .captures(whole.as_str())
        .and_then(|c| c.get(1)?.as_str().parse::<u32>().ok());
    Some(EmbedMatch {
        provider: Provider::YouTube,
        thumbnail: Some(thumbnail_url(&id)),
        id,
        url: whole.as_str().to_string(),
        start,
        span: (whole.start(), whole.end()),
    })
}

/// Accept an iframe `src` that already points at the YouTube player and
/// normalize it, or detect a watch URL pasted as an iframe src.
pub fn normalize_embed_src(src: &str) -> Option<String> {
    if let Some(caps) = EMBED_SRC_RE.captures(src) {
        let start = START_TIME_RE
            .captures(src)
            .and_then(|c| c.get(1)?.as_str().parse::<u32>().ok());
        return Some(player_src(&caps[1], start));
    }
    // Watch URLs pasted into an iframe are normalized to the player too.
    let matched = detect(src)?;
    if matched.span.0 == 0 {
        return Some(player_src(&matched.id, matched.start));
    }
    None
}

/// Canonical player URL.
pub fn player_src(id: &str, start: Option<u32>) -> String {
    match start {
        Some(s) if s > 0 => {
            format!("https://www.youtube.com/embed/{id}?enablejsapi=0&rel=0&start={s}")
        }
        _ => format!("https://www.youtube.com/embed/{id}?enablejsapi=0&rel=0"),
    }
}
