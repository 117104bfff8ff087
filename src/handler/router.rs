//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, the root
//! rewrite hook, delegation to static file serving and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::uri::PathAndQuery;
use hyper::{HeaderMap, Method, Request, Response, Uri};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) path, after the root rewrite
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _) = req.into_parts();
    let entry = AccessLogEntry::new(peer_addr, parts.method.to_string(), parts.uri.to_string())
        .with_version(parts.version);

    let is_head = parts.method == Method::HEAD;

    let response = match check_http_method(&parts.method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: rewrite_root(&parts.uri, &state.config.root_document),
                query: parts.uri.query(),
                is_head,
                if_modified_since: header_value(&parts.headers, "if-modified-since"),
                if_none_match: header_value(&parts.headers, "if-none-match"),
            };
            static_files::serve(&ctx, &state).await
        }
    };

    logger::log_access(&complete_entry(entry, &response, is_head));
    Ok(response)
}

/// Rewrite a request for `/` to the root document
///
/// Only a request target of exactly `/` is rewritten; `/?v=1` keeps the
/// root directory's own handling. Applied before any filesystem
/// resolution; every other path passes through untouched.
pub fn rewrite_root<'a>(uri: &'a Uri, root_document: &'a str) -> &'a str {
    let target = uri.path_and_query().map_or(uri.path(), PathAndQuery::as_str);
    if target == "/" {
        root_document
    } else {
        uri.path()
    }
}

/// Return 405 for anything but GET and HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => Some(http::build_405_response()),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Fill in the response side of an access log entry
///
/// HEAD responses send no body, so their size is logged as `-`.
fn complete_entry(
    mut entry: AccessLogEntry,
    response: &Response<Full<Bytes>>,
    is_head: bool,
) -> AccessLogEntry {
    entry.status = response.status().as_u16();
    entry.body_bytes = if is_head {
        None
    } else {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    };
    entry
}
