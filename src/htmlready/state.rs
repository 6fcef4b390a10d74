//! Metadata accumulated during tree traversal.

use std::collections::BTreeSet;

/// Everything noteworthy the transformer saw while walking the tree. Created
/// fresh per render call; callers use it to extract tags, mentioned users, and
/// preview images without re-parsing the output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TraversalState {
    /// Hashtags found in text nodes, lowercased, without `#`.
    pub hashtags: BTreeSet<String>,
    /// Mentioned account names, lowercased, without `@`.
    pub usertags: BTreeSet<String>,
    /// Image URLs, including embed thumbnails.
    pub images: BTreeSet<String>,
    /// Outbound and recognized media URLs.
    pub links: BTreeSet<String>,
    /// Element names present in the input markup.
    pub htmltags: BTreeSet<String>,
}
