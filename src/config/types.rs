use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

/// Immutable configuration resolved once at crawl start
#[derive(Debug)]
pub struct CrawlConfig {
    /// The URL the crawl starts from
    pub seed_url: Url,

    /// Domains eligible for crawling; defaults to the seed URL's host
    pub valid_domains: Vec<String>,

    /// Where crawled bytes are written
    pub output: OutputTarget,

    /// Fetch and traverse but never write anything
    pub skip_write: bool,

    /// Suppress hyperlink following (assets on the seed page still crawl)
    pub single_page: bool,
}

/// Output destination descriptor
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Local directory rooting the mirrored URL hierarchy
    Directory(PathBuf),

    /// S3 bucket with a flat key space
    S3(S3Target),
}

/// S3 bucket handle with static credentials
#[derive(Debug, Clone)]
pub struct S3Target {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// On-disk TOML configuration; every field optional, CLI flags override
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub crawl: CrawlSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// `[crawl]` section
#[derive(Debug, Default, Deserialize)]
pub struct CrawlSection {
    #[serde(rename = "valid-domains", default)]
    pub valid_domains: Vec<String>,

    #[serde(rename = "skip-write", default)]
    pub skip_write: bool,

    #[serde(rename = "single-page", default)]
    pub single_page: bool,
}

/// `[output]` section
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    pub directory: Option<String>,

    pub s3: Option<S3Section>,
}

/// `[output.s3]` section
#[derive(Debug, Default, Deserialize)]
pub struct S3Section {
    pub bucket: Option<String>,

    pub region: Option<String>,

    #[serde(rename = "access-key")]
    pub access_key: Option<String>,

    #[serde(rename = "secret-key")]
    pub secret_key: Option<String>,
}
