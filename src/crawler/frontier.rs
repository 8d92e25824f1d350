//! Crawl frontier: pending queue, seen set, and admission policy
//!
//! The frontier decides which discovered URLs enter the crawl. Admission is
//! either a domain allow-list (prefix match over `scheme://host`) or a
//! caller-supplied predicate that may rewrite or reject the URL; a
//! configured predicate is the sole gate. Deduplication keys on the URL
//! string after fragment removal and before any further normalization, so
//! query strings and trailing slashes distinguish entries.

use crate::crawler::RefKind;
use std::collections::{HashSet, VecDeque};

/// Metadata attached to a discovered URL
///
/// The type hint records which HTML/CSS construct produced the URL. It is
/// used for diagnostics and custom filtering only, never for path
/// computation.
#[derive(Debug, Clone, Default)]
pub struct UrlInfo {
    pub type_hint: Option<RefKind>,
}

impl UrlInfo {
    pub fn tagged(kind: RefKind) -> Self {
        Self {
            type_hint: Some(kind),
        }
    }
}

/// A URL admitted to the frontier, consumed exactly once when dequeued
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: String,
    pub info: UrlInfo,
}

/// Custom admission predicate: may rewrite the URL or reject it with `None`
pub type FilterUrl = Box<dyn Fn(&str, &UrlInfo) -> Option<String> + Send + Sync>;

/// Admission rule deciding whether a discovered URL is eligible to crawl
pub enum AdmissionPolicy {
    /// Allow URLs whose `scheme://host` prefix matches one of these domains
    Domains(Vec<String>),

    /// Sole admission gate when configured; overrides any domain list
    Predicate(FilterUrl),
}

impl AdmissionPolicy {
    /// Applies the policy, returning the (possibly rewritten) URL to enqueue
    fn admit(&self, url: &str, info: &UrlInfo) -> Option<String> {
        match self {
            AdmissionPolicy::Predicate(filter) => filter(url, info),
            AdmissionPolicy::Domains(domains) => {
                if matches_domain(url, domains) {
                    Some(url.to_string())
                } else {
                    None
                }
            }
        }
    }
}

/// Case-sensitive prefix match of `scheme://host` against the allow-list
///
/// URLs without an `http://`/`https://` scheme prefix are dropped.
fn matches_domain(url: &str, domains: &[String]) -> bool {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));

    match rest {
        Some(rest) => domains.iter().any(|domain| rest.starts_with(domain.as_str())),
        None => false,
    }
}

/// FIFO queue of URLs to crawl plus the record of URLs already seen
pub struct Frontier {
    pending: VecDeque<FrontierEntry>,
    seen: HashSet<String>,
    policy: AdmissionPolicy,
}

impl Frontier {
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self {
            pending: VecDeque::new(),
            seen: HashSet::new(),
            policy,
        }
    }

    /// Admits a URL to the tail of the queue
    ///
    /// The fragment is stripped first, then the admission policy runs, then
    /// the seen set deduplicates. Rejection and duplication are silent
    /// no-ops; the seen set covers processed URLs too, so re-enqueueing an
    /// already-dequeued URL does nothing.
    pub fn enqueue(&mut self, url: &str, info: UrlInfo) {
        let stripped = strip_fragment(url);

        let admitted = match self.policy.admit(stripped, &info) {
            Some(admitted) => admitted,
            None => {
                tracing::trace!("Rejected by admission policy: {}", stripped);
                return;
            }
        };

        if !self.seen.insert(admitted.clone()) {
            return;
        }

        tracing::debug!(
            "Enqueued {} ({})",
            admitted,
            info.type_hint
                .map(|k| k.as_str())
                .unwrap_or("untagged")
        );
        self.pending.push_back(FrontierEntry {
            url: admitted,
            info,
        });
    }

    /// Removes and returns the head entry; `None` means the crawl is done
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Drops everything from `#` onward
fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    }
}
