//! Generic URL detection and internal post/profile link recognition.
//!
//! "Internal" links are same-site (or whitelisted legacy-domain) URLs of the
//! shape `/<category>/@<author>/<permlink>`, `/@<author>`, or
//! `/@<author>/<tab>` for a closed tab set. The tree transformer downgrades
//! them to app-relative anchors with simplified anchor text.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::account::validate_account_name;

/// Canonical application host. External-link classification and the phishing
/// heuristic are both anchored on this.
pub const APP_HOST: &str = "steempro.com";

/// Hosts treated as the application itself.
const APP_HOSTS: &[&str] = &["steempro.com", "www.steempro.com"];

/// Deprecated front-end hosts whose links are rewritten to [`APP_HOST`].
const LEGACY_HOSTS: &[&str] = &[
    "steemit.com",
    "www.steemit.com",
    "busy.org",
    "www.busy.org",
    "steempeak.com",
    "www.steempeak.com",
];

/// Image/media hosts that never get the external-link treatment.
const TRUSTED_HOSTS: &[&str] = &[
    "steemitimages.com",
    "www.steemitimages.com",
    "cdn.steemitimages.com",
    "img.youtube.com",
];

/// Closed set of profile tab names accepted in `/@author/<tab>` links.
const PROFILE_TABS: &[&str] = &[
    "blog",
    "posts",
    "comments",
    "replies",
    "wallet",
    "followers",
    "following",
    "notifications",
    "settings",
];

static ANY_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"']+"#).expect("ANY_URL_RE: hardcoded regex is valid")
});

static POST_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([\w-]+)/@([a-z0-9.-]+)/([\w-]+)/?$")
        .expect("POST_PATH_RE: hardcoded regex is valid")
});

static PROFILE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/@([a-z0-9.-]+)(?:/([a-z]+))?/?$")
        .expect("PROFILE_PATH_RE: hardcoded regex is valid")
});

/// A recognized app-internal link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalLink {
    Post {
        category: String,
        author: String,
        permlink: String,
    },
    Profile {
        author: String,
        tab: Option<String>,
    },
}

impl InternalLink {
    /// App-relative href for this target.
    pub fn to_path(&self) -> String {
        match self {
            InternalLink::Post {
                category,
                author,
                permlink,
            } => format!("/{category}/@{author}/{permlink}"),
            InternalLink::Profile { author, tab: None } => format!("/@{author}"),
            InternalLink::Profile {
                author,
                tab: Some(tab),
            } => format!("/@{author}/{tab}"),
        }
    }

    /// Simplified visible text used when downgrading a full URL.
    pub fn anchor_text(&self) -> String {
        match self {
            InternalLink::Post {
                author, permlink, ..
            } => format!("@{author}/{permlink}"),
            InternalLink::Profile { author, .. } => format!("@{author}"),
        }
    }
}

/// Is `host` the application itself (any canonical spelling)?
pub fn is_app_host(host: &str) -> bool {
    APP_HOSTS.contains(&host)
}

/// Is `host` on the small trusted media-host allow-list?
pub fn is_trusted_host(host: &str) -> bool {
    TRUSTED_HOSTS.contains(&host)
}

/// Rewrite hrefs that reference a deprecated front-end domain to the canonical
/// application domain. Non-URL and unrelated hrefs pass through unchanged.
pub fn replace_old_domains(href: &str) -> String {
    let Ok(mut parsed) = Url::parse(href) else {
        return href.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return href.to_string();
    };
    if LEGACY_HOSTS.contains(&host) && parsed.set_host(Some(APP_HOST)).is_ok() {
        return parsed.to_string();
    }
    href.to_string()
}

/// Try to interpret `href` as an app-internal post or profile link.
///
/// Accepts app-relative paths and absolute URLs on the app or legacy hosts.
/// The author segment must be a valid account name and a tab segment, when
/// present, must belong to the closed tab set.
pub fn parse_internal_link(href: &str) -> Option<InternalLink> {
    let path = if href.starts_with('/') {
        href.to_string()
    } else {
        let parsed = Url::parse(href).ok()?;
        let host = parsed.host_str()?;
        if !is_app_host(host) && !LEGACY_HOSTS.contains(&host) {
            return None;
        }
        parsed.path().to_string()
    };

    if let Some(caps) = POST_PATH_RE.captures(&path) {
        let author = caps[2].to_string();
        if validate_account_name(&author).is_err() {
            return None;
        }
        return Some(InternalLink::Post {
            category: caps[1].to_string(),
            author,
            permlink: caps[3].to_string(),
        });
    }

    if let Some(caps) = PROFILE_PATH_RE.captures(&path) {
        let author = caps[1].to_string();
        if validate_account_name(&author).is_err() {
            return None;
        }
        let tab = caps.get(2).map(|m| m.as_str().to_string());
        if let Some(ref t) = tab {
            if !PROFILE_TABS.contains(&t.as_str()) {
                return None;
            }
        }
        return Some(InternalLink::Profile { author, tab });
    }

    None
}

/// One bare URL found in a text fragment. Trailing sentence punctuation is
/// excluded from the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    pub start: usize,
    pub end: usize,
    pub url: String,
}

/// Find all http/https URLs in `text`.
pub fn find_urls(text: &str) -> Vec<UrlMatch> {
    ANY_URL_RE
        .find_iter(text)
        .map(|m| {
            let trimmed = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
            UrlMatch {
                start: m.start(),
                end: m.start() + trimmed.len(),
                url: trimmed.to_string(),
            }
        })
        .filter(|u| !u.url.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_post_links() {
        let link = parse_internal_link("https://steempro.com/photography/@alice/my-post")
            .expect("post link");
        assert_eq!(
            link,
            InternalLink::Post {
                category: "photography".into(),
                author: "alice".into(),
                permlink: "my-post".into(),
            }
        );
        assert_eq!(link.to_path(), "/photography/@alice/my-post");
        assert_eq!(link.anchor_text(), "@alice/my-post");
    }

    #[test]
    fn recognizes_legacy_host_post_links() {
        assert!(parse_internal_link("https://steemit.com/life/@bob/hello-world").is_some());
    }

    #[test]
    fn recognizes_profile_and_tab_links() {
        assert_eq!(
            parse_internal_link("/@carol"),
            Some(InternalLink::Profile {
                author: "carol".into(),
                tab: None
            })
        );
        assert_eq!(
            parse_internal_link("https://www.steempro.com/@carol/wallet"),
            Some(InternalLink::Profile {
                author: "carol".into(),
                tab: Some("wallet".into())
            })
        );
    }

    #[test]
    fn rejects_unknown_tab_and_foreign_hosts() {
        assert!(parse_internal_link("/@carol/nonsense").is_none());
        assert!(parse_internal_link("https://evil.example/life/@bob/post").is_none());
    }

    #[test]
    fn rejects_invalid_author() {
        assert!(parse_internal_link("/@1x").is_none());
    }

    #[test]
    fn rewrites_legacy_domains() {
        assert_eq!(
            replace_old_domains("https://steemit.com/tag/@a/b"),
            "https://steempro.com/tag/@a/b"
        );
        assert_eq!(
            replace_old_domains("https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(replace_old_domains("/relative/path"), "/relative/path");
    }

    #[test]
    fn finds_urls_and_trims_punctuation() {
        let found = find_urls("see https://example.com/page, ok?");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://example.com/page");
        assert_eq!(&"see https://example.com/page, ok?"[found[0].start..found[0].end],
            "https://example.com/page");
    }
}
