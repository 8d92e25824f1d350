//! Crawler module: frontier, fetching, extraction, and orchestration
//!
//! The crawl loop pops a URL from the frontier, fetches it, persists the
//! body through the storage sink, and feeds discovered references back to
//! the frontier until it drains.

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlStats, Crawler, FilterProcess, Hooks, ProcessBody};
pub use fetcher::{build_http_client, fetch_url, FetchedResponse, FetchResult};
pub use frontier::{AdmissionPolicy, FilterUrl, Frontier, FrontierEntry, UrlInfo};
pub use parser::{extract, RefKind};

use crate::config::CrawlConfig;
use crate::Result;

/// Runs a complete crawl with no hooks configured
///
/// This is the main library entry point: it builds a [`Crawler`] from the
/// resolved configuration, runs it until the frontier is empty, and
/// returns the final counters.
pub async fn crawl(config: CrawlConfig) -> Result<CrawlStats> {
    let mut crawler = Crawler::new(config, Hooks::default())?;
    Ok(crawler.run().await)
}
