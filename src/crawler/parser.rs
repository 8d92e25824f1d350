//! Content extraction: discovering references in fetched documents
//!
//! Dispatches on the response content type: CSS bodies are scanned for
//! `url(...)` references, HTML bodies are parsed for links, scripts,
//! images, embedded CSS references, and hyperlinks. Any other content type
//! is terminal: the resource is persisted but never traversed.

use crate::url::resolve;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// Which HTML/CSS construct produced a discovered URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `<link href>`
    Link,
    /// `<script src>`
    Script,
    /// `<img src>`
    Image,
    /// `<a href>`
    Href,
    /// CSS `url(...)`
    CssUrl,
}

impl RefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::Link => "link",
            RefKind::Script => "script",
            RefKind::Image => "image",
            RefKind::Href => "href",
            RefKind::CssUrl => "css_url",
        }
    }
}

/// Extracts discoverable references from a fetched document
///
/// Returns absolute URLs tagged with the construct that produced them.
/// References are resolved against `base` before being returned; any that
/// fail to resolve are dropped (the resolver already logged them).
///
/// HTML extraction order is fixed: `<link href>`, `<script src>`,
/// `<img src>`, CSS `url()` references embedded in the document, then
/// `<a href>` unless single-page mode suppresses hyperlink following.
pub fn extract(
    content_type: &str,
    body: &str,
    base: &Url,
    single_page: bool,
) -> Vec<(String, RefKind)> {
    let content_type = content_type.to_ascii_lowercase();

    if content_type.contains("css") {
        extract_css_urls(body, base)
    } else if content_type.contains("html") {
        extract_html_refs(body, base, single_page)
    } else {
        Vec::new()
    }
}

/// Scans a CSS body for `url(...)` references (single/double/no quotes)
fn extract_css_urls(css: &str, base: &Url) -> Vec<(String, RefKind)> {
    css_url_pattern()
        .captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| resolve(base, m.as_str()))
        .map(|url| (url, RefKind::CssUrl))
        .collect()
}

fn css_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"url\(\s*['"]?(.+?)['"]?\s*\)"#).expect("css url pattern is valid")
    })
}

/// Extracts references from an HTML document in the fixed order
fn extract_html_refs(html: &str, base: &Url, single_page: bool) -> Vec<(String, RefKind)> {
    let document = Html::parse_document(html);
    let mut refs = Vec::new();

    select_attr(&document, "link[href]", "href", RefKind::Link, base, &mut refs);
    select_attr(&document, "script[src]", "src", RefKind::Script, base, &mut refs);
    select_attr(&document, "img[src]", "src", RefKind::Image, base, &mut refs);

    // Inline styles and <style> blocks reference assets through url() too;
    // the raw document is scanned the same way a stylesheet body is.
    refs.extend(extract_css_urls(html, base));

    if !single_page {
        select_attr(&document, "a[href]", "href", RefKind::Href, base, &mut refs);
    }

    refs
}

/// Collects one attribute across all elements matching a selector
fn select_attr(
    document: &Html,
    selector: &str,
    attr: &str,
    kind: RefKind,
    base: &Url,
    out: &mut Vec<(String, RefKind)>,
) {
    let selector = match Selector::parse(selector) {
        Ok(selector) => selector,
        Err(_) => return,
    };

    for element in document.select(&selector) {
        if let Some(value) = element.value().attr(attr) {
            if let Some(absolute) = resolve(base, value) {
                out.push((absolute, kind));
            }
        }
    }
}
