//! Edit-history reconstruction and diffing.
//!
//! Raw history entries arrive oldest-first; entry 0 is the original post and
//! later entries store either a full body or diff-match-patch text against
//! the reconstructed body of the previous entry. Reconstruction is strictly
//! sequential. Each version past the first also carries inline HTML diffs of
//! title, tags, and body against its predecessor, computed with semantic
//! cleanup so trivial adjacent edits merge into readable chunks.
//!
//! A patch that fails to apply degrades to treating the stored text as a full
//! body; the affected version may show stale content but the list renders.

pub mod patch;

use dissimilar::Chunk;
use log::warn;
use serde::Deserialize;

/// One raw history entry as fetched, oldest-first.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHistoryEntry {
    pub time: String,
    #[serde(default)]
    pub title: String,
    pub body: String,
    /// JSON string; `tags` is extracted from it when present.
    #[serde(default)]
    pub json_metadata: String,
}

/// One reconstructed point in the edit history. Diff fields are `None` for
/// the original version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryVersion {
    pub time: String,
    pub title: String,
    /// Fully reconstructed body, patches already applied.
    pub body: String,
    /// Comma-joined tag list from `json_metadata`.
    pub tags: String,
    pub title_diff: Option<String>,
    pub tags_diff: Option<String>,
    pub body_diff: Option<String>,
}

/// Reconstruct all versions and compute inter-version diffs.
pub fn build_versions(entries: &[RawHistoryEntry]) -> Vec<HistoryVersion> {
    let mut versions: Vec<HistoryVersion> = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let body = if i > 0 && patch::looks_like_patch(&entry.body) {
            match patch::apply_patch_text(&entry.body, &versions[i - 1].body) {
                Ok(applied) => applied,
                Err(err) => {
                    warn!("history entry {i}: patch did not apply ({err}), using stored text");
                    entry.body.clone()
                }
            }
        } else {
            entry.body.clone()
        };
        let tags = extract_tags(&entry.json_metadata);

        let (title_diff, tags_diff, body_diff) = match versions.last() {
            Some(prev) => (
                Some(diff_html(&prev.title, &entry.title)),
                Some(diff_html(&prev.tags, &tags)),
                Some(diff_html(&prev.body, &body)),
            ),
            None => (None, None, None),
        };

        versions.push(HistoryVersion {
            time: entry.time.clone(),
            title: entry.title.clone(),
            body,
            tags,
            title_diff,
            tags_diff,
            body_diff,
        });
    }
    versions
}

/// Inline diff markup between two texts: removals in `<del>`, additions in
/// `<span class="diff-add">`, text escaped, newlines as `<br>`.
pub fn diff_html(old: &str, new: &str) -> String {
    let mut out = String::new();
    for chunk in dissimilar::diff(old, new) {
        match chunk {
            Chunk::Equal(text) => out.push_str(&escape_br(text)),
            Chunk::Delete(text) => {
                out.push_str("<del>");
                out.push_str(&escape_br(text));
                out.push_str("</del>");
            }
            Chunk::Insert(text) => {
                out.push_str(r#"<span class="diff-add">"#);
                out.push_str(&escape_br(text));
                out.push_str("</span>");
            }
        }
    }
    out
}

fn escape_br(text: &str) -> String {
    html_escape::encode_text(text).replace('\n', "<br>")
}

/// Pull the `tags` array out of a `json_metadata` string. Malformed or absent
/// metadata yields an empty string.
fn extract_tags(json_metadata: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(json_metadata) else {
        return String::new();
    };
    let Some(tags) = value.get("tags").and_then(|t| t.as_array()) else {
        return String::new();
    };
    tags.iter()
        .filter_map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
