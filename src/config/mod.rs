//! Configuration for a crawl run
//!
//! Configuration is resolved exactly once at startup from an optional TOML
//! file plus CLI flags (flags win). The result is an immutable
//! [`CrawlConfig`] handed to the crawler; configuration problems are the
//! only fatal errors in the program.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{CrawlConfig, CrawlSection, FileConfig, OutputSection, OutputTarget, S3Section, S3Target};
pub use validation::{resolve_config, Overrides};
