//! HTTP cache validation module
//!
//! Provides `Last-Modified` generation and `If-Modified-Since` handling.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Format a modification time as an HTTP date
///
/// # Returns
/// e.g. `Sat, 17 Oct 2026 12:00:00 GMT`
pub fn last_modified(mtime: SystemTime) -> String {
    httpdate::fmt_http_date(mtime)
}

/// Check whether the client's cached copy is still current
///
/// `If-None-Match` takes precedence, so its presence disables the date
/// check. An unparseable date is ignored.
///
/// # Arguments
/// * `if_modified_since` - Client-sent If-Modified-Since header
/// * `if_none_match` - Client-sent If-None-Match header
/// * `mtime` - File modification time
///
/// # Returns
/// Returns true if the file is unmodified (should return 304), false otherwise
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    if_none_match: Option<&str>,
    mtime: SystemTime,
) -> bool {
    if if_none_match.is_some() {
        return false;
    }
    let Some(since) = if_modified_since.and_then(|v| httpdate::parse_http_date(v).ok()) else {
        return false;
    };
    truncate_to_secs(mtime) <= since
}

/// HTTP dates have one-second resolution
fn truncate_to_secs(time: SystemTime) -> SystemTime {
    time.duration_since(UNIX_EPOCH)
        .map_or(time, |d| UNIX_EPOCH + Duration::from_secs(d.as_secs()))
}
