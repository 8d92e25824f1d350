//! HTTP fetcher: one GET per frontier URL, classified into a tagged result
//!
//! Redirects are handled manually so the crawler can persist redirect stubs
//! at the source path. Connection reuse per host:port is delegated to
//! reqwest's internal connection pool, which keeps one persistent
//! connection per host for the lifetime of the client.

use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched resource
#[derive(Debug)]
pub struct FetchedResponse {
    /// Final URL of the response (identical to the request URL, since
    /// redirects are never followed automatically)
    pub final_url: Url,

    /// Content-Type header value, empty when absent
    pub content_type: String,

    /// Raw response body
    pub body: Vec<u8>,
}

/// Classified outcome of fetching one URL
#[derive(Debug)]
pub enum FetchResult {
    /// 2xx response with body
    Success(FetchedResponse),

    /// 3xx response; carries the raw Location header value
    Redirect { location: String },

    /// Any other HTTP status
    HttpError { status_code: u16, message: String },

    /// TLS failure, connection reset, timeout, and similar transport
    /// failures; never fatal for the crawl
    TransportError { error: String },
}

/// Builds the HTTP client used for the whole crawl run
///
/// Redirects are disabled so 3xx responses surface as [`FetchResult::Redirect`].
/// The per-fetch timeout means a hung server shows up as a transport error
/// rather than stalling the run.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("petrify/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    tracing::debug!("Fetching {}", url);

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_transport_error(e),
    };

    let status = response.status();

    if status.is_redirection() {
        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        return match location {
            Some(location) => FetchResult::Redirect { location },
            None => FetchResult::HttpError {
                status_code: status.as_u16(),
                message: "redirect without Location header".to_string(),
            },
        };
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            message: status.canonical_reason().unwrap_or("").to_string(),
        };
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.bytes().await {
        Ok(bytes) => FetchResult::Success(FetchedResponse {
            final_url,
            content_type,
            body: bytes.to_vec(),
        }),
        Err(e) => FetchResult::TransportError {
            error: e.to_string(),
        },
    }
}

fn classify_transport_error(e: reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchResult::TransportError { error }
}
