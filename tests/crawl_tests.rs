//! End-to-end crawl tests
//!
//! These tests run the full crawl cycle against a wiremock server and
//! check the mirrored tree written to a temp directory.

use petrify::config::{CrawlConfig, OutputTarget};
use petrify::crawler::{Crawler, Hooks};
use std::fs;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, output: &TempDir) -> CrawlConfig {
    let seed_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let host = seed_url.host_str().unwrap().to_string();
    CrawlConfig {
        seed_url,
        valid_domains: vec![host],
        output: OutputTarget::Directory(output.path().to_path_buf()),
        skip_write: false,
        single_page: false,
    }
}

async fn mount(server: &MockServer, at: &str, content_type: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.to_vec())
                .insert_header("content-type", content_type),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_site_mirror() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        "text/html",
        br#"<html><head>
            <link href="/style.css" rel="stylesheet">
            <script src="/app.js"></script>
            </head><body>
            <img src="/logo.png">
            <a href="/about">About</a>
            <a href="/docs/">Docs</a>
            </body></html>"#,
    )
    .await;
    mount(
        &server,
        "/style.css",
        "text/css",
        b"body { background: url('/images/bg.png'); }",
    )
    .await;
    mount(&server, "/app.js", "application/javascript", b"console.log(1);").await;
    mount(&server, "/logo.png", "image/png", b"\x89PNG logo").await;
    mount(&server, "/images/bg.png", "image/png", b"\x89PNG bg").await;
    mount(
        &server,
        "/about",
        "text/html",
        br#"<html><body><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount(
        &server,
        "/docs/",
        "text/html",
        br#"<html><body>docs index</body></html>"#,
    )
    .await;

    let output = TempDir::new().unwrap();
    let mut crawler = Crawler::new(config_for(&server, &output), Hooks::default()).unwrap();
    let stats = crawler.run().await;

    // 7 distinct resources; the back-link from /about to / dedups
    assert_eq!(stats.fetched, 7);
    assert_eq!(stats.saved, 7);
    assert_eq!(stats.errors, 0);

    let root = output.path();
    assert!(root.join("index.html").is_file());
    assert!(root.join("style.css").is_file());
    assert!(root.join("app.js").is_file());
    assert!(root.join("logo.png").is_file());
    assert_eq!(fs::read(root.join("images/bg.png")).unwrap(), b"\x89PNG bg");
    assert!(root.join("about").is_file());
    assert!(root.join("docs/index.html").is_file());
}

#[tokio::test]
async fn test_crawl_resolves_directory_file_collision() {
    let server = MockServer::start().await;

    // /a is discovered and saved as a file before /a/b needs it to be a
    // directory.
    mount(
        &server,
        "/",
        "text/html",
        br#"<html><body><a href="/a">A</a><a href="/a/b">B</a></body></html>"#,
    )
    .await;
    mount(&server, "/a", "text/html", b"<html><body>page a</body></html>").await;
    mount(&server, "/a/b", "text/html", b"<html><body>page b</body></html>").await;

    let output = TempDir::new().unwrap();
    let mut crawler = Crawler::new(config_for(&server, &output), Hooks::default()).unwrap();
    let stats = crawler.run().await;

    assert_eq!(stats.errors, 0);
    let root = output.path();
    assert_eq!(
        fs::read(root.join("a.d")).unwrap(),
        b"<html><body>page a</body></html>"
    );
    assert_eq!(
        fs::read(root.join("a/index.html")).unwrap(),
        b"<html><body>page a</body></html>"
    );
    assert_eq!(
        fs::read(root.join("a/b")).unwrap(),
        b"<html><body>page b</body></html>"
    );
}

#[tokio::test]
async fn test_fragments_collapse_to_one_fetch() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        "text/html",
        br#"<html><body>
            <a href="/page#intro">Intro</a>
            <a href="/page#details">Details</a>
            </body></html>"#,
    )
    .await;
    mount(&server, "/page", "text/html", b"<html><body>page</body></html>").await;

    let output = TempDir::new().unwrap();
    let mut crawler = Crawler::new(config_for(&server, &output), Hooks::default()).unwrap();
    let stats = crawler.run().await;

    // Seed plus exactly one fetch of /page
    assert_eq!(stats.fetched, 2);
}

#[tokio::test]
async fn test_query_strings_are_distinct_resources() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        "text/html",
        br#"<html><body>
            <a href="/list?page=1">1</a>
            <a href="/list?page=2">2</a>
            </body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>a list</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let mut crawler = Crawler::new(config_for(&server, &output), Hooks::default()).unwrap();
    let stats = crawler.run().await;

    assert_eq!(stats.fetched, 3);
    assert!(output.path().join("list?page=1").is_file());
    assert!(output.path().join("list?page=2").is_file());
}

#[tokio::test]
async fn test_single_page_mirrors_assets_only() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        "text/html",
        br#"<html><head><link href="/style.css" rel="stylesheet"></head>
            <body><a href="/other">Other</a></body></html>"#,
    )
    .await;
    mount(&server, "/style.css", "text/css", b"body {}").await;
    mount(&server, "/other", "text/html", b"<html><body>other</body></html>").await;

    let output = TempDir::new().unwrap();
    let mut config = config_for(&server, &output);
    config.single_page = true;

    let mut crawler = Crawler::new(config, Hooks::default()).unwrap();
    let stats = crawler.run().await;

    // The stylesheet is fetched, the hyperlink is not
    assert_eq!(stats.fetched, 2);
    assert!(output.path().join("style.css").is_file());
    assert!(!output.path().join("other").exists());
}

#[tokio::test]
async fn test_offsite_links_are_not_crawled() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        "text/html",
        br#"<html><body>
            <a href="http://offsite.example/x">Elsewhere</a>
            <a href="/here">Here</a>
            </body></html>"#,
    )
    .await;
    mount(&server, "/here", "text/html", b"<html><body>here</body></html>").await;

    let output = TempDir::new().unwrap();
    let mut crawler = Crawler::new(config_for(&server, &output), Hooks::default()).unwrap();
    let stats = crawler.run().await;

    assert_eq!(stats.fetched, 2);
    assert_eq!(stats.errors, 0);
}

#[tokio::test]
async fn test_transport_error_does_not_abort_crawl() {
    let server = MockServer::start().await;

    // A link to a port nothing listens on, then a healthy page
    mount(
        &server,
        "/",
        "text/html",
        br#"<html><body>
            <a href="http://127.0.0.1:1/dead">Dead</a>
            <a href="/alive">Alive</a>
            </body></html>"#,
    )
    .await;
    mount(&server, "/alive", "text/html", b"<html><body>alive</body></html>").await;

    let output = TempDir::new().unwrap();
    let mut crawler = Crawler::new(config_for(&server, &output), Hooks::default()).unwrap();
    let stats = crawler.run().await;

    assert_eq!(stats.errors, 1);
    assert!(output.path().join("alive").is_file());
}
