//! Twitch URL detection and player URL construction.
//!
//! Media ids are either `videos/<digits>` for recorded videos or a bare
//! channel name for live channels; the player URL differs between the two.

use std::sync::LazyLock;

use regex::Regex;

use super::{EmbedMatch, Provider};
use crate::recognize::links::APP_HOST;

static TWITCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.)?twitch\.tv/(videos/\d+|[A-Za-z0-9_]{3,25})\b[^\s<>]*")
        .expect("TWITCH_RE: hardcoded regex is valid")
});

static EMBED_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://player\.twitch\.tv/\?(video=v?(\d+)|channel=([A-Za-z0-9_]{3,25}))")
        .expect("EMBED_SRC_RE: hardcoded regex is valid")
});

/// Detect the first Twitch video or channel URL in `text`.
pub fn detect(text: &str) -> Option<EmbedMatch> {
    let caps = TWITCH_RE.captures(text)?;
    let whole = caps.get(0)?;
    Some(EmbedMatch {
        provider: Provider::Twitch,
        id: caps.get(1)?.as_str().to_string(),
        url: whole.as_str().to_string(),
        start: None,
        thumbnail: None,
        span: (whole.start(), whole.end()),
    })
}

/// Accept a player src or a plain twitch.tv URL pasted as an iframe src.
pub fn normalize_embed_src(src: &str) -> Option<String> {
    if let Some(caps) = EMBED_SRC_RE.captures(src) {
        if let Some(video) = caps.get(2) {
            return Some(player_src(&format!("videos/{}", video.as_str())));
        }
        if let Some(channel) = caps.get(3) {
            return Some(player_src(channel.as_str()));
        }
    }
    let matched = detect(src)?;
    (matched.span.0 == 0).then(|| player_src(&matched.id))
}

/// Canonical player URL for a `videos/<digits>` or channel id.
pub fn player_src(id: &str) -> String {
    match id.strip_prefix("videos/") {
        Some(video) => {
            format!("https://player.twitch.tv/?video={video}&parent={APP_HOST}&autoplay=false")
        }
        None => format!("https://player.twitch.tv/?channel={id}&parent={APP_HOST}&autoplay=false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_recorded_video() {
        let m = detect("vod: https://www.twitch.tv/videos/123456789").expect("match");
        assert_eq!(m.id, "videos/123456789");
    }

    #[test]
    fn detects_channel() {
        let m = detect("live at https://twitch.tv/somechannel now").expect("match");
        assert_eq!(m.id, "somechannel");
    }

    #[test]
    fn player_src_distinguishes_videos_from_channels() {
        assert!(player_src("videos/42").contains("video=42"));
        assert!(player_src("somechannel").contains("channel=somechannel"));
    }

    #[test]
    fn normalizes_player_src() {
        assert_eq!(
            normalize_embed_src("https://player.twitch.tv/?video=123"),
            Some(player_src("videos/123"))
        );
        assert!(normalize_embed_src("https://player.example/?video=123").is_none());
    }
}
