//! Phishing-looking anchor detection.
//!
//! An anchor whose visible text contains a domain name that is not the domain
//! its `href` actually points at is impersonating that domain. Such anchors
//! are downgraded to inert text by the transformer.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Tooltip set on the `div.phishy` replacement. The sanitizer only lets a
/// `title` through on `div.phishy` when it equals this exact text.
pub const PHISHY_WARNING: &str =
    "Link expanded to plain text; beware of a potential phishing attempt";

static DOMAIN_IN_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\s(/])((?:[a-z0-9-]+\.)+[a-z]{2,})(?:$|[\s)/:,])")
        .expect("DOMAIN_IN_TEXT_RE: hardcoded regex is valid")
});

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Does this anchor's visible text claim a domain its href does not point at?
///
/// Relative and fragment hrefs are never phishy. Text without anything
/// domain-shaped in it is never phishy.
pub fn looks_phishy(anchor_text: &str, href: &str) -> bool {
    if href.starts_with('/') || href.starts_with('#') {
        return false;
    }
    let Ok(parsed) = Url::parse(href) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = strip_www(host).to_ascii_lowercase();

    let Some(caps) = DOMAIN_IN_TEXT_RE.captures(anchor_text) else {
        return false;
    };
    let claimed = strip_www(&caps[1]).to_ascii_lowercase();

    // The claim is honest when it names the href host, a parent domain of it,
    // or a subdomain of it.
    claimed != host
        && !host.ends_with(&format!(".{claimed}"))
        && !claimed.ends_with(&format!(".{host}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impersonating_text_is_phishy() {
        assert!(looks_phishy(
            "steemit.com",
            "http://evil.example/steemit.com"
        ));
        assert!(looks_phishy("visit steempro.com now", "https://phish.example/"));
    }

    #[test]
    fn honest_anchors_are_not_phishy() {
        assert!(!looks_phishy("example.com", "https://example.com/page"));
        assert!(!looks_phishy("example.com", "https://www.example.com/"));
        assert!(!looks_phishy("blog.example.com is down", "https://example.com"));
        assert!(!looks_phishy("example.com", "https://sub.example.com/x"));
    }

    #[test]
    fn plain_text_is_not_phishy() {
        assert!(!looks_phishy("click here", "https://anywhere.example/"));
    }

    #[test]
    fn relative_hrefs_are_not_phishy() {
        assert!(!looks_phishy("steemit.com", "/@alice/post"));
        assert!(!looks_phishy("steemit.com", "#section"));
    }
}
