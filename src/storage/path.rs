//! Storage-path resolution
//!
//! Maps a fetched resource's URL onto a storage location. The filesystem
//! mapping keeps the URL's path hierarchy; the object-storage mapping is a
//! flat key. Query strings become literal characters in the mapped path so
//! that `/a/b?q=1` and `/a/b?q=2` land in distinct files.

use url::Url;

/// A storage-relative path derived from a URL
///
/// `segments` are the directory components leading up to the resource and
/// `filename` is everything after the last `/`. An empty filename means the
/// URL was directory-style and the resource is written as `index.html`
/// inside that directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    pub segments: Vec<String>,
    pub filename: String,
}

impl StoragePath {
    /// Whether this path names a directory rather than a file
    pub fn is_directory(&self) -> bool {
        self.filename.is_empty()
    }
}

/// Maps a URL to a filesystem storage path
///
/// The URL's query string, when present, is appended to the path as a
/// literal `?query` suffix before segmenting. The path is then split on `/`:
/// non-empty leading components become directory segments and the remainder
/// after the last `/` becomes the filename.
pub fn map_path(uri: &Url) -> StoragePath {
    map_raw(&raw_path(uri))
}

/// Maps a URL to a flat object-storage key
///
/// A trailing `/` is rewritten to `/index.html`, a single leading `/` is
/// stripped, and an entirely empty path becomes `index.html`. Object
/// storage has no directory/file conflict, so no collision handling is
/// needed here.
pub fn object_key(uri: &Url) -> String {
    key_for(&raw_path(uri))
}

/// Path plus literal query suffix, the input to both mappings
fn raw_path(uri: &Url) -> String {
    let mut raw = uri.path().to_string();
    if let Some(query) = uri.query() {
        raw.push('?');
        raw.push_str(query);
    }
    raw
}

fn map_raw(raw: &str) -> StoragePath {
    match raw.rfind('/') {
        Some(idx) => StoragePath {
            segments: raw[..idx]
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            filename: raw[idx + 1..].to_string(),
        },
        None => StoragePath {
            segments: Vec::new(),
            filename: raw.to_string(),
        },
    }
}

fn key_for(raw: &str) -> String {
    let mut key = raw.to_string();
    if key.ends_with('/') {
        key.push_str("index.html");
    }
    let key = key.strip_prefix('/').unwrap_or(key.as_str()).to_string();
    if key.is_empty() {
        "index.html".to_string()
    } else {
        key
    }
}
