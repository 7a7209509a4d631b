use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Lower-cased extension (with leading dot) to content type.
static MIME_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        (".bin", "application/octet-stream"),
        (".html", "text/html"),
        (".htm", "text/html"),
        (".css", "text/css"),
        (".js", "text/javascript"),
        (".json", "application/json"),
        (".php", "application/x-httpd-php"),
        (".md", "text/markdown"),
        (".txt", "text/plain"),
        (".jpg", "image/jpeg"),
        (".jpeg", "image/jpeg"),
        (".png", "image/png"),
        (".gif", "image/gif"),
        (".webp", "image/webp"),
    ]
    .into_iter()
    .collect()
});

/// Looks up a content type by extension, e.g. `".png"`. Case-insensitive.
pub fn lookup(extension: &str) -> Option<&'static str> {
    MIME_TYPES.get(extension.to_ascii_lowercase().as_str()).copied()
}

/// Content type for a file, falling back to `application/octet-stream`.
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| lookup(&format!(".{ext}")))
        .unwrap_or(DEFAULT_MIME_TYPE)
}
