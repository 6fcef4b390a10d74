//! `#tag` hashtag detection.

use std::sync::LazyLock;

use regex::Regex;

static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s>(])(#[a-zA-Z0-9][a-zA-Z0-9-]*)")
        .expect("HASHTAG_RE: hardcoded regex is valid")
});

/// One hashtag occurrence inside a text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashtag {
    /// Byte offset of the `#` in the input.
    pub start: usize,
    /// Byte offset one past the last tag character.
    pub end: usize,
    /// Lowercased tag (no `#`).
    pub tag: String,
}

/// Find all hashtags in `text`. Purely numeric candidates (`#123`) are not
/// hashtags; a tag must contain at least one letter.
pub fn find_hashtags(text: &str) -> Vec<Hashtag> {
    let mut out = Vec::new();
    for caps in HASHTAG_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        let candidate = &m.as_str()[1..];
        if !candidate.chars().any(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        out.push(Hashtag {
            start: m.start(),
            end: m.end(),
            tag: candidate.to_ascii_lowercase(),
        });
    }
    out
}
