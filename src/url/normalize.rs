use crate::UrlError;
use url::Url;

/// Normalizes a seed URL.
///
/// Parsing already gives the canonical form: the `url` crate lowercases the
/// scheme and host, removes dot segments, and normalizes percent-encoding.
/// Re-serializing a parsed URL is therefore a fixed point, which makes
/// normalization idempotent.
///
/// Only `http` and `https` URLs with a host are accepted here — the seed's
/// host becomes the crawl's origin host, so a host-less URL cannot start a
/// run.
///
/// # Examples
///
/// ```
/// use linkscour::url::normalize_url;
///
/// let url = normalize_url("HTTP://Example.COM/a/../b").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/b");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
