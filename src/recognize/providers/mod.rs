//! Embed provider recognizers.
//!
//! Each provider module exposes pure, stateless detection against a text
//! fragment plus normalization of iframe `src` values the sanitizer is asked
//! to validate. Detection order is fixed (YouTube first, 3Speak last) and each
//! pass operates on the previous pass's output, so a URL consumed by one
//! provider is never re-examined by the next.

pub mod dtube;
pub mod threespeak;
pub mod twitch;
pub mod vimeo;
pub mod youtube;

/// A recognized embed provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    YouTube,
    Vimeo,
    Twitch,
    DTube,
    ThreeSpeak,
}

impl Provider {
    /// Fixed substitution order for text-node scanning.
    pub const DETECTION_ORDER: [Provider; 5] = [
        Provider::YouTube,
        Provider::Vimeo,
        Provider::Twitch,
        Provider::DTube,
        Provider::ThreeSpeak,
    ];

    /// Stable identifier used inside embed tokens.
    pub fn id(&self) -> &'static str {
        match self {
            Provider::YouTube => "youtube",
            Provider::Vimeo => "vimeo",
            Provider::Twitch => "twitch",
            Provider::DTube => "dtube",
            Provider::ThreeSpeak => "threespeak",
        }
    }

    pub fn from_id(id: &str) -> Option<Provider> {
        match id {
            "youtube" => Some(Provider::YouTube),
            "vimeo" => Some(Provider::Vimeo),
            "twitch" => Some(Provider::Twitch),
            "dtube" => Some(Provider::DTube),
            "threespeak" => Some(Provider::ThreeSpeak),
            _ => None,
        }
    }
}

/// One provider URL recognized inside a text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedMatch {
    pub provider: Provider,
    /// Provider-specific media id (video id, `author/permlink`, channel name).
    pub id: String,
    /// The URL text that matched.
    pub url: String,
    /// Start offset in seconds, when the URL carries one (YouTube).
    pub start: Option<u32>,
    /// Preview image, when the provider has a derivable one.
    pub thumbnail: Option<String>,
    /// Byte range of the match in the scanned text.
    pub span: (usize, usize),
}

/// Detect the first occurrence of `provider`'s URL pattern in `text`.
pub fn detect(provider: Provider, text: &str) -> Option<EmbedMatch> {
    match provider {
        Provider::YouTube => youtube::detect(text),
        Provider::Vimeo => vimeo::detect(text),
        Provider::Twitch => twitch::detect(text),
        Provider::DTube => dtube::detect(text),
        Provider::ThreeSpeak => threespeak::detect(text),
    }
}

/// An iframe `src` accepted by the embed-provider whitelist, normalized to
/// the provider's canonical player URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIframe {
    pub url: String,
    pub provider: Provider,
    pub width: u32,
    pub height: u32,
    /// Sandbox attribute value to set, when the provider requires one.
    pub sandbox: Option<&'static str>,
}

/// Validate an iframe `src` against the known embed providers.
///
/// Returns `None` when the src matches no provider; the sanitizer then
/// rejects the iframe. `large` selects the player dimensions.
pub fn validate_iframe_src(src: &str, large: bool) -> Option<ValidatedIframe> {
    let (width, height) = if large { (640, 360) } else { (480, 270) };
    for provider in Provider::DETECTION_ORDER {
        let normalized = match provider {
            Provider::YouTube => youtube::normalize_embed_src(src),
            Provider::Vimeo => vimeo::normalize_embed_src(src),
            Provider::Twitch => twitch::normalize_embed_src(src),
            Provider::DTube => dtube::normalize_embed_src(src),
            Provider::ThreeSpeak => threespeak::normalize_embed_src(src),
        };
        if let Some(url) = normalized {
            let sandbox = match provider {
                // DTube player scripts are third-party controlled; keep them boxed.
                Provider::DTube => Some("allow-scripts allow-same-origin"),
                _ => None,
            };
            return Some(ValidatedIframe {
                url,
                provider,
                width,
                height,
                sandbox,
            });
        }
    }
    None
}

/// Canonical player URL for a token payload, used by the embed expander.
pub fn player_src(provider: Provider, id: &str, start: Option<u32>) -> Option<String> {
    match provider {
        Provider::YouTube => Some(youtube::player_src(id, start)),
        Provider::Vimeo => Some(vimeo::player_src(id)),
        Provider::Twitch => Some(twitch::player_src(id)),
        Provider::DTube => Some(dtube::player_src(id)),
        Provider::ThreeSpeak => Some(threespeak::player_src(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iframe_validation_covers_all_providers() {
        assert!(validate_iframe_src("https://www.youtube.com/embed/dQw4w9WgXcQ", true).is_some());
        assert!(validate_iframe_src("https://player.vimeo.com/video/1234", true).is_some());
        assert!(validate_iframe_src("https://player.twitch.tv/?video=123", true).is_some());
        assert!(validate_iframe_src("https://emb.d.tube/#!/alice/my-video", true).is_some());
        assert!(validate_iframe_src("https://3speak.tv/embed?v=alice/my-video", true).is_some());
    }

    #[test]
    fn iframe_validation_rejects_unknown_hosts() {
        assert!(validate_iframe_src("https://evil.example/embed/xyz", true).is_none());
        assert!(validate_iframe_src("javascript:alert(1)", true).is_none());
    }

    #[test]
    fn dimensions_follow_layout_hint() {
        let large = validate_iframe_src("https://player.vimeo.com/video/1", true).expect("valid");
        assert_eq!((large.width, large.height), (640, 360));
        let small = validate_iframe_src("https://player.vimeo.com/video/1", false).expect("valid");
        assert_eq!((small.width, small.height), (480, 270));
    }
}
