//! Storage sinks for crawled resources
//!
//! A [`Sink`] is polymorphic over the two supported backends: a local
//! directory that mirrors the URL hierarchy, and an S3 bucket with a flat
//! key space. Path/key computation lives in [`path`] so the mapping rules
//! can be tested independently of any IO.

mod fs;
mod path;
mod s3;

pub use fs::DirSink;
pub use path::{map_path, object_key, StoragePath};
pub use s3::ObjectSink;

use crate::config::OutputTarget;
use thiserror::Error;
use url::Url;

/// Errors that can occur while persisting a resource
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload failed for {key}: {message}")]
    Upload { key: String, message: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend for the crawl output
pub enum Sink {
    Directory(DirSink),
    Object(ObjectSink),
}

impl Sink {
    /// Builds the sink matching the configured output target
    pub fn for_target(target: &OutputTarget) -> Self {
        match target {
            OutputTarget::Directory(root) => Sink::Directory(DirSink::new(root)),
            OutputTarget::S3(s3) => Sink::Object(ObjectSink::new(s3)),
        }
    }

    /// Persists a resource body at the location mapped from its URL
    pub async fn write(&self, uri: &Url, body: &[u8], content_type: &str) -> StorageResult<()> {
        match self {
            Sink::Directory(dir) => {
                dir.write(uri, body)?;
            }
            Sink::Object(object) => {
                object.write(uri, body, content_type).await?;
            }
        }
        Ok(())
    }
}
