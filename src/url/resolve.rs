use crate::UrlError;
use url::Url;

/// Resolves `reference` against `base` per RFC 3986.
///
/// Handles absolute references, relative paths, `./` and `../` segments,
/// protocol-relative references, and fragment-only references. A resolution
/// failure means "skip this reference": callers drop the single offending
/// reference rather than aborting the crawl.
///
/// # Examples
///
/// ```
/// use linkscour::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("http://localhost/hello/world/").unwrap();
/// let resolved = resolve(&base, "../link4.php").unwrap();
/// assert_eq!(resolved.as_str(), "http://localhost/hello/link4.php");
/// ```
pub fn resolve(base: &Url, reference: &str) -> Result<Url, UrlError> {
    base.join(reference)
        .map_err(|e| UrlError::Parse(e.to_string()))
}

/// Host component of a URL, empty when absent (e.g. `mailto:` references).
///
/// Callers filter non-http(s) schemes upstream; the empty-string fallback
/// only exists so host comparison never panics.
pub fn host(url: &Url) -> &str {
    url.host_str().unwrap_or("")
}

/// Returns the URL with any `#fragment` removed, so that `page#a` and
/// `page#b` deduplicate to a single visited target.
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}
