//! Petrify: a static-site mirroring crawler
//!
//! This crate crawls a website from a seed URL, discovers linked resources
//! (pages, images, scripts, stylesheets, CSS-referenced assets), and writes
//! a static mirror to a local directory or an S3 bucket.

pub mod config;
pub mod crawler;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Petrify operations
#[derive(Debug, Error)]
pub enum PetrifyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error {status} for {url}: {message}")]
    Http {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors; these are the only fatal startup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeed { url: String, message: String },
}

/// Result type alias for Petrify operations
pub type Result<T> = std::result::Result<T, PetrifyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CrawlConfig, OutputTarget, S3Target};
pub use crawler::{CrawlStats, Crawler, FetchResult, Frontier, Hooks, RefKind};
pub use storage::{map_path, object_key, Sink, StoragePath};
pub use self::url::resolve;
