//! Crawl orchestration
//!
//! The [`Crawler`] owns the frontier, the HTTP client, and the storage sink
//! for the duration of one run. The loop is single-threaded cooperative:
//! one fetch completes fully (persistence and all derived enqueues) before
//! the next dequeue, so the frontier is never observed in an inconsistent
//! state. Per-URL failures are logged and contained; nothing aborts the run
//! once it has started.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchedResponse, FetchResult};
use crate::crawler::frontier::{AdmissionPolicy, FilterUrl, Frontier, FrontierEntry, UrlInfo};
use crate::crawler::parser::extract;
use crate::storage::Sink;
use crate::Result;
use reqwest::Client;
use url::Url;

/// Per-response filter: returning true skips the response entirely
/// (no persistence, no extraction)
pub type FilterProcess = Box<dyn Fn(&FetchedResponse, &Url) -> bool + Send + Sync>;

/// Body transform applied immediately before a write
pub type ProcessBody = Box<dyn Fn(Vec<u8>, &Url) -> Vec<u8> + Send + Sync>;

/// Optional caller-supplied hooks, all absent by default
#[derive(Default)]
pub struct Hooks {
    /// Replaces the domain allow-list as the sole admission gate
    pub filter_url: Option<FilterUrl>,

    pub filter_process: Option<FilterProcess>,

    pub process_body: Option<ProcessBody>,
}

/// Counters reported when a crawl finishes
#[derive(Debug, Default, Clone, Copy)]
pub struct CrawlStats {
    /// Completed HTTP exchanges (successes and redirects)
    pub fetched: u64,

    /// Resources written to the sink
    pub saved: u64,

    /// Per-URL failures of any kind
    pub errors: u64,
}

/// The crawl orchestrator
pub struct Crawler {
    config: CrawlConfig,
    frontier: Frontier,
    client: Client,
    sink: Sink,
    filter_process: Option<FilterProcess>,
    process_body: Option<ProcessBody>,
    stats: CrawlStats,
}

impl Crawler {
    /// Creates a crawler and seeds the frontier with the configured URL
    ///
    /// When `hooks.filter_url` is present it becomes the admission policy;
    /// otherwise admission is the configured domain allow-list.
    pub fn new(config: CrawlConfig, hooks: Hooks) -> Result<Self> {
        let policy = match hooks.filter_url {
            Some(filter) => AdmissionPolicy::Predicate(filter),
            None => AdmissionPolicy::Domains(config.valid_domains.clone()),
        };

        let mut frontier = Frontier::new(policy);
        frontier.enqueue(config.seed_url.as_str(), UrlInfo::default());

        let client = build_http_client()?;
        let sink = Sink::for_target(&config.output);

        Ok(Self {
            config,
            frontier,
            client,
            sink,
            filter_process: hooks.filter_process,
            process_body: hooks.process_body,
            stats: CrawlStats::default(),
        })
    }

    /// Runs the crawl to completion: loop until the frontier drains
    pub async fn run(&mut self) -> CrawlStats {
        tracing::info!("Starting crawl");

        while let Some(entry) = self.frontier.dequeue() {
            self.process_entry(entry).await;
        }

        tracing::info!(
            "Finished crawl: {} fetched, {} saved, {} errors",
            self.stats.fetched,
            self.stats.saved,
            self.stats.errors
        );
        self.stats
    }

    /// Fetches one frontier entry and routes the classified result
    async fn process_entry(&mut self, entry: FrontierEntry) {
        let uri = match Url::parse(&entry.url) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::error!("Skipping unparseable URL {}: {}", entry.url, e);
                self.stats.errors += 1;
                return;
            }
        };

        match fetch_url(&self.client, &uri).await {
            FetchResult::Success(response) => {
                self.stats.fetched += 1;
                self.process_success(response, &uri).await;
            }
            FetchResult::Redirect { location } => {
                self.stats.fetched += 1;
                tracing::debug!("Processing redirect to {}", location);
                self.process_redirect(&uri, &location).await;
            }
            FetchResult::HttpError {
                status_code,
                message,
            } => {
                self.stats.errors += 1;
                tracing::error!(
                    "Error {}:{} fetching url {}",
                    status_code,
                    message,
                    entry.url
                );
            }
            FetchResult::TransportError { error } => {
                self.stats.errors += 1;
                tracing::error!("Error {} fetching url {}", error, entry.url);
            }
        }
    }

    /// Persists a successful response and enqueues its references
    async fn process_success(&mut self, response: FetchedResponse, uri: &Url) {
        if let Some(filter) = &self.filter_process {
            if filter(&response, uri) {
                tracing::debug!("Response filtered out: {}", uri);
                return;
            }
        }

        // Extraction reads the raw body; the process_body hook only affects
        // what gets written.
        let body_text = String::from_utf8_lossy(&response.body).into_owned();
        let refs = extract(
            &response.content_type,
            &body_text,
            &response.final_url,
            self.config.single_page,
        );

        let final_url = response.final_url.clone();
        self.save(&final_url, response.body, &response.content_type)
            .await;

        for (url, kind) in refs {
            self.frontier.enqueue(&url, UrlInfo::tagged(kind));
        }
    }

    /// Persists a meta-refresh stub at the source path, then follows
    ///
    /// The stub preserves the old address in the mirror; the raw Location
    /// value is enqueued untagged and goes through normal admission.
    async fn process_redirect(&mut self, uri: &Url, destination: &str) {
        let body = format!(
            "<html><head><META http-equiv='refresh' content='0;URL=\"{destination}\"'></head>\
             <body>You are being redirected to <a href='{destination}'>{destination}</a>.</body></html>"
        );
        self.save(uri, body.into_bytes(), "text/html").await;
        self.frontier.enqueue(destination, UrlInfo::default());
    }

    /// Writes a body through the sink unless writes are disabled
    ///
    /// A write failure is an error for this item only; the crawl continues.
    async fn save(&mut self, uri: &Url, body: Vec<u8>, content_type: &str) {
        if self.config.skip_write {
            return;
        }

        let body = match &self.process_body {
            Some(transform) => transform(body, uri),
            None => body,
        };

        match self.sink.write(uri, &body, content_type).await {
            Ok(()) => self.stats.saved += 1,
            Err(e) => {
                tracing::error!("Failed to save {}: {}", uri, e);
                self.stats.errors += 1;
            }
        }
    }
}
