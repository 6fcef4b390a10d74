//! Image proxy URL building.
//!
//! Pure string functions; no network access. Post images are routed through
//! the external image CDN both for resizing and so that third-party image
//! hosts never see reader traffic.

use std::sync::LazyLock;

use regex::Regex;

/// Image CDN prefix.
pub const IMAGE_PROXY_BASE: &str = "https://steemitimages.com";

/// Default resize hint applied to post body images.
pub const DEFAULT_SIZE: &str = "640x0";

/// IPFS gateway used for protocol-relative `ipfs/` image paths.
pub const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

static PROXIED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://(?:cdn\.)?steemitimages\.com/(?:\d+x\d+/|p/)")
        .expect("PROXIED_RE: hardcoded regex is valid")
});

static IPFS_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:/?ipfs/)([1-9A-HJ-NP-Za-km-z]{40,})")
        .expect("IPFS_PATH_RE: hardcoded regex is valid")
});

static DEFAULT_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://steemitimages\.com/640x0/(.+)$")
        .expect("DEFAULT_SIZE_RE: hardcoded regex is valid")
});

/// Is this URL already served by the image CDN (and therefore not to be
/// proxied a second time)?
pub fn is_proxied(url: &str) -> bool {
    PROXIED_RE.is_match(url)
}

/// Route an absolute image URL through the image CDN with a resize hint.
/// URLs already on the CDN are returned unchanged.
pub fn proxify_image_url(url: &str, size: &str) -> String {
    if is_proxied(url) {
        return url.to_string();
    }
    format!("{IMAGE_PROXY_BASE}/{size}/{url}")
}

/// Rewrite an IPFS-relative path (`/ipfs/Qm...`) to an absolute gateway URL.
pub fn normalize_ipfs_url(src: &str) -> Option<String> {
    let caps = IPFS_PATH_RE.captures(src)?;
    Some(format!("{IPFS_GATEWAY}{}", &caps[1]))
}

/// For a src proxied at the default size, the double-resolution variant used
/// as a `srcset` entry.
pub fn double_size_src(src: &str) -> Option<String> {
    let caps = DEFAULT_SIZE_RE.captures(src)?;
    Some(format!("{IMAGE_PROXY_BASE}/1280x0/{}", &caps[1]))
}
