//! Decides what a confined path serves and loads it.

use std::path::{Path, PathBuf};

use crate::http::mime;

/// Outcome of looking at a confined path on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing servable at the path
    NotFound,
    /// The path is a regular file
    File,
    /// The path is a directory holding an index file
    DirectoryIndex,
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),
    #[error("cannot read {}: {source}", .path.display())]
    ResourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A loaded file, ready to become a response body.
#[derive(Debug)]
pub struct Resource {
    /// The effective target, after directory-to-index substitution
    pub path: PathBuf,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Pure decision over what the filesystem reported.
pub fn decide(exists: bool, is_dir: bool, index_exists: bool) -> Resolution {
    match (exists, is_dir, index_exists) {
        (false, _, _) => Resolution::NotFound,
        (true, true, false) => Resolution::NotFound,
        (true, true, true) => Resolution::DirectoryIndex,
        (true, false, _) => Resolution::File,
    }
}

/// Finds the effective target for `resolved`, substituting `index_file`
/// for directories. Filesystem state is looked up fresh on every call.
pub async fn locate(resolved: &Path, index_file: &str) -> Result<PathBuf, ResourceError> {
    let metadata = tokio::fs::metadata(resolved).await.ok();
    let exists = metadata.is_some();
    let is_dir = metadata.as_ref().is_some_and(|m| m.is_dir());

    let index = resolved.join(index_file);
    let index_exists = is_dir && tokio::fs::metadata(&index).await.is_ok();

    match decide(exists, is_dir, index_exists) {
        Resolution::NotFound => Err(ResourceError::ResourceNotFound(resolved.to_path_buf())),
        Resolution::File => Ok(resolved.to_path_buf()),
        Resolution::DirectoryIndex => Ok(index),
    }
}

/// Reads `path` in full and tags it with its content type.
pub async fn load(path: &Path) -> Result<Resource, ResourceError> {
    let body = tokio::fs::read(path)
        .await
        .map_err(|source| ResourceError::ResourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Resource {
        path: path.to_path_buf(),
        content_type: mime::content_type_for(path),
        body,
    })
}
