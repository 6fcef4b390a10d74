//! Link and pattern recognizers.
//!
//! Pure, stateless text matchers: embed provider URLs, `@user` mentions,
//! `#tag` hashtags, generic URLs, and app-internal post/profile links. Every
//! pattern lives behind a `LazyLock` static so concurrent renders share
//! compiled regexes without any mutable state.

pub mod account;
pub mod hashtag;
pub mod links;
pub mod mention;
pub mod providers;

pub use account::validate_account_name;
pub use hashtag::{find_hashtags, Hashtag};
pub use links::{
    find_urls, is_app_host, is_trusted_host, parse_internal_link, replace_old_domains,
    InternalLink, UrlMatch, APP_HOST,
};
pub use mention::{find_mentions, Mention};
pub use providers::{
    detect, validate_iframe_src, EmbedMatch, Provider, ValidatedIframe,
};
