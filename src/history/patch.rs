//! diff-match-patch patch-text parsing and application.
//!
//! Historical post edits are stored on chain either as full bodies or as
//! diff-match-patch patch text produced by the original posting client:
//!
//! ```text
//! @@ -1,11 +1,17 @@
//!  Hello%20
//! +brave%20
//!  world
//! ```
//!
//! Headers carry 1-based start coordinates and lengths (a length of 1 may be
//! omitted, a length of 0 switches the start to 0-based). Payload lines are
//! percent-encoded with a leading ` `/`+`/`-` op character. Application here
//! is exact: context and deletion lines must match the text they are applied
//! to, and a mismatch is an error the caller degrades from.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::PatchError;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@$")
        .expect("HEADER_RE: hardcoded regex is valid")
});

/// Does a stored body look like patch text rather than a full body?
pub fn looks_like_patch(body: &str) -> bool {
    body.starts_with("@@")
}

/// One hunk: header coordinates plus decoded payload lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    start1: usize,
    len1: usize,
    start2: usize,
    len2: usize,
    /// (`' '` | `'+'` | `'-'`, decoded text) in order.
    lines: Vec<(char, String)>,
}

/// Parse a full patch body into hunks.
pub fn parse_patches(text: &str) -> Result<Vec<Patch>, PatchError> {
    let mut patches: Vec<Patch> = Vec::new();
    for line in text.lines() {
        if let Some(caps) = HEADER_RE.captures(line) {
            let num = |i: usize| -> usize {
                caps.get(i)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(1)
            };
            patches.push(Patch {
                start1: num(1),
                len1: num(2),
                start2: num(3),
                len2: num(4),
                lines: Vec::new(),
            });
            continue;
        }
        let current = patches
            .last_mut()
            .ok_or_else(|| PatchError::BadHeader(line.to_string()))?;
        let op = line.chars().next().ok_or(PatchError::BadEncoding)?;
        if !matches!(op, ' ' | '+' | '-') {
            return Err(PatchError::BadLine(line.to_string()));
        }
        let decoded = urlencoding::decode(&line[1..])
            .map_err(|_| PatchError::BadEncoding)?
            .into_owned();
        current.lines.push((op, decoded));
    }
    if patches.is_empty() {
        return Err(PatchError::BadHeader(text.lines().next().unwrap_or("").to_string()));
    }
    Ok(patches)
}

/// Apply patch text to `base`, returning the patched text. Hunk coordinates
/// are taken from the post-image side (`+`), which is exact when every hunk
/// before it applied exactly.
pub fn apply_patch_text(patch_text: &str, base: &str) -> Result<String, PatchError> {
    let patches = parse_patches(patch_text)?;
    let mut chars: Vec<char> = base.chars().collect();

    for patch in &patches {
        let mut pos = if patch.len2 == 0 {
            patch.start2
        } else {
            patch.start2.checked_sub(1).ok_or(PatchError::ContextMismatch)?
        };
        for (op, text) in &patch.lines {
            let segment: Vec<char> = text.chars().collect();
            match op {
                ' ' => {
                    expect_segment(&chars, pos, &segment)?;
                    pos += segment.len();
                }
                '-' => {
                    expect_segment(&chars, pos, &segment)?;
                    chars.drain(pos..pos + segment.len());
                }
                '+' => {
                    if pos > chars.len() {
                        return Err(PatchError::ContextMismatch);
                    }
                    chars.splice(pos..pos, segment.iter().copied());
                    pos += segment.len();
                }
                _ => unreachable!("parse_patches only admits ' ', '+', '-'"),
            }
        }
    }
    Ok(chars.into_iter().collect())
}

fn expect_segment(chars: &[char], pos: usize, segment: &[char]) -> Result<(), PatchError> {
    let end = pos + segment.len();
    if end > chars.len() || &chars[pos..end] != segment {
        return Err(PatchError::ContextMismatch);
    }
    Ok(())
}
