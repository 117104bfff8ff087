//! MIME type detection module
//!
//! Maps a file's extension to the `Content-Type` it is served with.

use std::collections::HashMap;
use std::path::Path;

/// Content type used when an extension has no entry
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension-to-content-type table
///
/// Keys include the leading dot (`".wasm"`). The empty-string key is the
/// fallback for unknown or missing extensions. Lookups are case-sensitive.
///
/// # Examples
/// ```
/// use devserve::http::mime::ContentTypeTable;
/// let table = ContentTypeTable::default();
/// assert_eq!(table.lookup(".wasm"), "application/wasm");
/// assert_eq!(table.lookup(".HTML"), "application/octet-stream");
/// assert_eq!(table.for_path("app/main.js"), "application/javascript");
/// ```
#[derive(Debug, Clone)]
pub struct ContentTypeTable {
    entries: HashMap<String, String>,
}

impl Default for ContentTypeTable {
    fn default() -> Self {
        Self::from_entries([
            (".html", "text/html"),
            (".css", "text/css"),
            (".js", "application/javascript"),
            (".svg", "image/svg+xml"),
            (".wasm", "application/wasm"),
            ("", OCTET_STREAM),
        ])
    }
}

impl ContentTypeTable {
    /// Build a table from `(extension, content type)` pairs
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(ext, ty)| (ext.to_string(), ty.to_string()))
                .collect(),
        }
    }

    /// Content type for an extension (with leading dot, or `""` for none)
    pub fn lookup(&self, extension: &str) -> &str {
        self.entries
            .get(extension)
            .or_else(|| self.entries.get(""))
            .map_or(OCTET_STREAM, String::as_str)
    }

    /// Content type for a file path, keyed on its extension
    pub fn for_path(&self, path: impl AsRef<Path>) -> &str {
        self.lookup(&extension_of(path.as_ref()))
    }
}

/// Extension of the last path component including the dot
///
/// A leading dot (`.bashrc`) is not an extension.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
