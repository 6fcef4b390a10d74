//! The allow-list: tags, per-tag attributes, URL schemes, div classes.
//!
//! Everything not named here is stripped. Unknown tags are unwrapped (the tag
//! goes, its children stay) except for the drop-subtree set, whose content is
//! executable or form-like and must not leak into the document as text.

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: &[&str] = &[
    "div", "iframe", "del", "a", "p", "b", "i", "q", "br", "ul", "li", "ol", "img", "h1", "h2",
    "h3", "h4", "h5", "h6", "hr", "blockquote", "pre", "code", "em", "strong", "center", "table",
    "thead", "tbody", "tr", "th", "td", "strike", "sup", "sub", "span", "details", "summary",
];

/// Disallowed tags whose entire subtree is removed instead of unwrapped.
pub const DROP_SUBTREE_TAGS: &[&str] = &[
    "script", "style", "head", "title", "textarea", "noscript", "object", "embed", "applet",
    "form", "button", "select", "option",
];

/// URL schemes permitted on `href`/`src`. Relative URLs and fragments always
/// pass.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "steem", "esteem"];

/// `div` classes that survive. `title` survives only on `phishy` with the
/// exact warning text.
pub const ALLOWED_DIV_CLASSES: &[&str] = &[
    "pull-right",
    "pull-left",
    "text-justify",
    "text-rtl",
    "text-center",
    "text-right",
    "videoWrapper",
    "iframeWrapper",
    "phishy",
    "table-responsive",
];

/// Replacement text for images in no-image mode.
pub const NO_IMAGE_TEXT: &str = "(Image not shown due to low ratings)";

/// Substitute for an image src that is not an absolute URL.
pub const BROKEN_IMAGE_SRC: &str = "/images/brokenimg.jpg";

/// Warning title set on external anchors.
pub const EXTERNAL_LINK_TITLE: &str = "This link will take you away from steempro.com";

/// Class marking external anchors.
pub const EXTERNAL_LINK_CLASS: &str = "external-link";

pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAGS.contains(&tag)
}

pub fn drops_subtree(tag: &str) -> bool {
    DROP_SUBTREE_TAGS.contains(&tag)
}

/// Attributes permitted per tag, before per-tag transforms run. `data-bg` on
/// `span` and `style` on cells are consumed and re-validated by transforms.
pub fn allowed_attrs(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "rel", "title", "class", "target", "id"],
        "img" => &["src", "srcset", "alt", "class"],
        "iframe" => &[
            "src",
            "width",
            "height",
            "frameborder",
            "allowfullscreen",
            "webkitallowfullscreen",
            "mozallowfullscreen",
            "sandbox",
            "class",
        ],
        "div" => &["class", "title"],
        "td" | "th" => &["style"],
        "span" => &["class", "style", "data-bg"],
        "pre" | "code" => &["class"],
        _ => &[],
    }
}

/// Scheme check for a single URL attribute value. Relative paths, fragments,
/// and protocol-relative URLs pass; any explicit scheme must be allow-listed.
pub fn url_scheme_ok(value: &str) -> bool {
    let before_path = value
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(value);
    match before_path.find(':') {
        Some(idx) => {
            let scheme = before_path[..idx].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
        None => true,
    }
}
