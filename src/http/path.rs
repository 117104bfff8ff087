//! Request path translation module
//!
//! Turns a request target into a filesystem path that can never leave the
//! serving root.

use std::path::{Component, Path, PathBuf};
use std::string::FromUtf8Error;

/// Request path resolved against the serving root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    pub fs_path: PathBuf,
    /// Whether the decoded request path ended in `/`
    pub trailing_slash: bool,
}

/// Resolve `request_path` under `root`
///
/// Query and fragment are dropped, the remainder is percent-decoded and its
/// segments normalized lexically: empty and `.` segments vanish, `..` removes
/// the previous segment and is ignored at the top.
///
/// Fails only when the decoded bytes are not valid UTF-8.
pub fn translate_path(root: &Path, request_path: &str) -> Result<TranslatedPath, FromUtf8Error> {
    let path = strip_query(request_path);
    let decoded = urlencoding::decode(path)?;
    let trailing_slash = decoded.trim_end().ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut fs_path = root.to_path_buf();
    for segment in segments.into_iter().filter(|s| is_plain_segment(s)) {
        fs_path.push(segment);
    }

    Ok(TranslatedPath {
        fs_path,
        trailing_slash,
    })
}

/// Request path without `?query` or `#fragment`
pub fn strip_query(target: &str) -> &str {
    target
        .split_once(['?', '#'])
        .map_or(target, |(path, _)| path)
}

/// Segment that joins as exactly one normal path component
///
/// Rejects anything the platform would read as a root, prefix or separator.
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
