//! Render configuration.

use serde::Deserialize;

/// Per-render configuration. Each flag independently toggles one stage's
/// behavior; see the module docs of the stage it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Skip sanitization entirely. Only for content the caller fully trusts;
    /// a warning is logged whenever this is set.
    pub allow_dangerous_html: bool,
    /// Render soft newlines as `<br>`.
    pub breaks: bool,
    /// Tree-transformer image stripping: every `<img>` becomes a
    /// `<pre class="image-url-only">` carrying just the source URL.
    pub hide_images: bool,
    /// Sanitizer image redaction: every `<img>` is replaced with placeholder
    /// text (used for posts hidden by low ratings).
    pub no_image: bool,
    /// Relaxes the `rel` attribute on external links (no `nofollow`).
    pub high_quality_post: bool,
    /// Carried for the caller's content wrapper; not used by the pipeline.
    pub is_nsfw: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            allow_dangerous_html: false,
            breaks: true,
            hide_images: false,
            no_image: false,
            high_quality_post: true,
            is_nsfw: false,
        }
    }
}
