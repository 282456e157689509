//! Link extraction from raw markup.
//!
//! This is deliberately an attribute-value scan, not an HTML parse: after
//! comment blocks are removed, every `src="..."` / `href="..."` occurrence
//! is captured regardless of which tag it sits in (`<a>`, `<img>`,
//! `<script>`, `<link>`, ...). Markup inside `<!-- ... -->` never produces
//! a link.

use crate::url::{host, resolve, strip_fragment};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static COMMENT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<!--.*?-->").expect("comment pattern"));

static SRC_HREF_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(?:src|href)="(.*?)""#).expect("attribute pattern"));

/// A link discovered on a page, fragment already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub url: Url,

    /// True when the link's host differs from the crawl's origin host.
    ///
    /// The comparison is against the *session's* origin host, not the
    /// current page's host: links found on a page that was itself reached
    /// as an external leaf are still classified relative to the seed.
    pub external: bool,
}

/// Extracts every http(s) link referenced by `html`, in document order.
///
/// References that fail to resolve against `base` are dropped one by one;
/// the extraction itself never fails, and an empty vec means no qualifying
/// attribute was found.
pub fn extract_links(base: &Url, html: &str, origin_host: &str) -> Vec<ExtractedLink> {
    let stripped = COMMENT_BLOCK.replace_all(html, "");

    let mut links = Vec::new();
    for capture in SRC_HREF_ATTR.captures_iter(&stripped) {
        let Ok(resolved) = resolve(base, &capture[1]) else {
            continue;
        };

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }

        let external = host(&resolved) != origin_host;
        links.push(ExtractedLink {
            url: strip_fragment(&resolved),
            external,
        });
    }

    links
}
