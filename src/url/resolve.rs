use url::Url;

/// Resolves a reference found in a document against its base URL
///
/// References that already look absolute (start with `http`/`https`,
/// case-insensitive) are passed through with spaces replaced by `+`. This is
/// a legacy encoding rule that existing mirrors depend on, so it is kept
/// exactly as-is rather than re-encoded properly.
///
/// Everything else is joined onto the base URL with its query stripped:
/// relative paths, absolute paths, and protocol-relative references all
/// resolve per standard URL-join semantics.
///
/// A reference that fails to resolve is not an error for the crawl: the
/// failure is logged and `None` is returned so the caller can discard it.
///
/// # Examples
///
/// ```
/// use petrify::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("http://test.com/dir/page").unwrap();
/// assert_eq!(resolve(&base, "../x"), Some("http://test.com/x".to_string()));
/// ```
pub fn resolve(base: &Url, reference: &str) -> Option<String> {
    if starts_with_http(reference) {
        return Some(reference.replace(' ', "+"));
    }

    let mut stripped = base.clone();
    stripped.set_query(None);

    match stripped.join(reference) {
        Ok(absolute) => Some(absolute.to_string()),
        Err(e) => {
            tracing::error!("Could not make absolute {} - {}: {}", stripped, reference, e);
            None
        }
    }
}

/// ASCII case-insensitive check for an `http`/`https` prefix
fn starts_with_http(reference: &str) -> bool {
    reference
        .get(..4)
        .map(|p| p.eq_ignore_ascii_case("http"))
        .unwrap_or(false)
}
