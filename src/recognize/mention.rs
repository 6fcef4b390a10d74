//! `@username` mention detection.
//!
//! The boundary rule is deliberately explicit rather than ported: the `@` must
//! not be preceded by an identifier-like character (`[A-Za-z0-9_.=/#@-]`), so
//! `user@domain.com` and `https://x.com/@user` never produce a mention. The
//! candidate name must then pass full Steem account-name validation.

use std::sync::LazyLock;

use fancy_regex::Regex;

use super::account::validate_account_name;

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?<![\w.=/#@-])@([a-zA-Z][a-zA-Z0-9.-]*)")
        .expect("MENTION_RE: hardcoded regex is valid")
});

/// One accepted mention occurrence inside a text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// Byte offset of the `@` in the input.
    pub start: usize,
    /// Byte offset one past the last accepted name character.
    pub end: usize,
    /// Lowercased, validated account name (no `@`).
    pub name: String,
}

/// Find all mentions in `text` whose candidate name is a valid account name.
/// Trailing dots and dashes are not part of the name (`"hi @alice."` mentions
/// `alice`), matching how names appear at sentence ends.
pub fn find_mentions(text: &str) -> Vec<Mention> {
    let mut out = Vec::new();
    for m in MENTION_RE.captures_iter(text) {
        let Ok(caps) = m else { continue };
        let Some(whole) = caps.get(0) else { continue };
        let Some(raw) = caps.get(1) else { continue };
        let trimmed = raw.as_str().trim_end_matches(['.', '-']);
        if trimmed.is_empty() {
            continue;
        }
        let name = trimmed.to_ascii_lowercase();
        if validate_account_name(&name).is_err() {
            continue;
        }
        out.push(Mention {
            start: whole.start(),
            end: whole.start() + 1 + trimmed.len(),
            name,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        find_mentions(text).into_iter().map(|m| m.name).collect()
    }

    #[test]
    fn matches_simple_mention() {
        assert_eq!(names("hello @validuser world"), vec!["validuser"]);
    }

    #[test]
    fn rejects_invalid_account_names() {
        assert!(names("hello @1invalid world").is_empty());
        assert!(names("hello @ab world").is_empty());
    }

    #[test]
    fn email_addresses_are_not_mentions() {
        assert!(names("mail me at user@domain.com please").is_empty());
    }

    #[test]
    fn url_handles_are_not_mentions() {
        assert!(names("see https://twitter.com/@someuser there").is_empty());
    }

    #[test]
    fn mention_at_start_and_after_punctuation() {
        assert_eq!(names("@alice, meet @bob!"), vec!["alice", "bob"]);
        assert_eq!(names("(@carol)"), vec!["carol"]);
    }

    #[test]
    fn trailing_dot_excluded_from_name() {
        let found = find_mentions("thanks @alice.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "alice");
        assert_eq!(&"thanks @alice."[found[0].start..found[0].end], "@alice");
    }

    #[test]
    fn uppercase_is_normalized() {
        assert_eq!(names("hi @Alice"), vec!["alice"]);
    }

    #[test]
    fn double_at_is_not_a_mention() {
        assert!(names("weird @@alice text").is_empty());
    }
}
