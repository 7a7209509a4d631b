//! Confinement of request paths to the document root.
//!
//! A resolved path is always either the document root itself or lies
//! strictly below it. Containment is checked component-wise, so a root of
//! `/public` never contains `/public2`.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The path tried to climb out of the document root.
    #[error("path traversal attempt: {0:?}")]
    TraversalRejected(String),
    /// The path cannot be turned into a filesystem path at all.
    #[error("unrepresentable path: {0:?}")]
    UnrepresentablePath(String),
}

/// Resolves a raw request path against `document_root`.
///
/// 1. Any `..` in the raw or percent-decoded path is a traversal attempt.
/// 2. The query string and fragment are dropped and the rest is normalized
///    lexically and joined onto the root.
/// 3. Root and joined path are made absolute.
/// 4. The result must equal the root or lie below it.
pub fn resolve(request_path: &str, document_root: &Path) -> Result<PathBuf, ResolveError> {
    let traversal = || ResolveError::TraversalRejected(request_path.to_string());
    let unrepresentable = || ResolveError::UnrepresentablePath(request_path.to_string());

    if request_path.contains("..") {
        return Err(traversal());
    }

    let decoded = urlencoding::decode(strip_query(request_path)).map_err(|_| unrepresentable())?;
    if decoded.contains("..") {
        return Err(traversal());
    }
    if decoded.contains('\0') {
        return Err(unrepresentable());
    }

    let relative = normalize_request_path(&decoded).ok_or_else(unrepresentable)?;

    let root = absolute(document_root).ok_or_else(unrepresentable)?;
    let resolved = absolute(&root.join(relative)).ok_or_else(unrepresentable)?;

    if is_within(&resolved, &root) {
        Ok(resolved)
    } else {
        Err(traversal())
    }
}

/// True if `path` is `root` or lies below it.
///
/// `Path::starts_with` compares whole components, which gives the
/// "root followed by a separator" rule for free.
pub fn is_within(path: &Path, root: &Path) -> bool {
    path == root || path.starts_with(root)
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Turns a request path into a relative path made only of normal components.
/// Returns `None` for anything carrying a platform prefix or a parent segment.
fn normalize_request_path(path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();

    for component in Path::new(path).components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(part) => relative.push(part),
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }

    Some(relative)
}

/// Absolute, lexically cleaned form of `path`. Symlinks are not followed.
fn absolute(path: &Path) -> Option<PathBuf> {
    let path = std::path::absolute(path).ok()?;
    let mut cleaned = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }

    Some(cleaned)
}
