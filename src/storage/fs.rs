//! Local filesystem sink
//!
//! Writes crawled resources under an output directory, mirroring the URL
//! path hierarchy. URL trees allow a path to be both a "file" and a
//! "directory" (`/a` and `/a/b`), which a filesystem does not; when that
//! collision occurs the existing file is renamed to `<name>.d`, a real
//! directory takes its place, and the original bytes are copied to
//! `index.html` inside it so the resource stays reachable.

use crate::storage::{map_path, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use url::Url;

/// Filesystem storage sink rooted at an output directory
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a resource body at the path mapped from its URL
    ///
    /// Parent directories are materialized segment by segment, promoting
    /// any file that stands where a directory is needed. Returns the path
    /// the bytes were written to.
    pub fn write(&self, uri: &Url, body: &[u8]) -> StorageResult<PathBuf> {
        let mapped = map_path(uri);

        create_dir_tolerant(&self.root, true)?;

        let mut current = self.root.clone();
        for segment in &mapped.segments {
            current.push(segment);
            if current.is_file() {
                promote_file_to_directory(&current)?;
            } else if !current.exists() {
                create_dir_tolerant(&current, false)?;
            }
        }

        if mapped.is_directory() {
            let index = current.join("index.html");
            write_file(&index, body)?;
            return Ok(index);
        }

        let outfile = current.join(&mapped.filename);
        if outfile.is_dir() {
            // An earlier URL already created this path as a directory, so
            // the file body lands next to it as `<name>.d` and is mirrored
            // into the directory's index.html.
            let dirfile = dotted_sibling(&outfile);
            write_file(&dirfile, body)?;
            copy_file(&dirfile, &outfile.join("index.html"))?;
            Ok(dirfile)
        } else {
            write_file(&outfile, body)?;
            Ok(outfile)
        }
    }
}

/// Replaces a file with a directory, preserving the file's bytes
///
/// The file moves to `<name>.d` and its contents are copied into the new
/// directory as `index.html`.
fn promote_file_to_directory(path: &Path) -> StorageResult<()> {
    let dirfile = dotted_sibling(path);
    fs::rename(path, &dirfile).map_err(|e| io_error(path, e))?;
    create_dir_tolerant(path, false)?;
    copy_file(&dirfile, &path.join("index.html"))?;
    Ok(())
}

/// The `<name>.d` sibling for a colliding path
fn dotted_sibling(path: &Path) -> PathBuf {
    let mut sibling = path.as_os_str().to_os_string();
    sibling.push(".d");
    PathBuf::from(sibling)
}

/// Creates a directory, tolerating concurrent "already exists" races
fn create_dir_tolerant(path: &Path, recursive: bool) -> StorageResult<()> {
    let result = if recursive {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(io_error(path, e)),
    }
}

fn write_file(path: &Path, body: &[u8]) -> StorageResult<()> {
    tracing::info!("Saving {}", path.display());
    fs::write(path, body).map_err(|e| io_error(path, e))
}

fn copy_file(from: &Path, to: &Path) -> StorageResult<()> {
    fs::copy(from, to).map(|_| ()).map_err(|e| io_error(to, e))
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}
