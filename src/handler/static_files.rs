//! Static file serving module
//!
//! Resolves a request path under the serving root and answers with the
//! file, a directory redirect, an index file or a directory listing.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncReadExt;

/// Serve the (already rewritten) request path
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let translated = match path::translate_path(&state.config.root, ctx.path) {
        Ok(t) => t,
        Err(e) => {
            logger::log_warning(&format!("Undecodable request path '{}': {e}", ctx.path));
            return http::build_400_response();
        }
    };

    // Missing paths are routine, not worth a log line
    let Ok(metadata) = fs::metadata(&translated.fs_path).await else {
        return http::build_404_response();
    };

    if metadata.is_dir() {
        return serve_directory(ctx, state, &translated.fs_path).await;
    }

    // FIFOs, sockets and devices are never served; opening a FIFO blocks
    if translated.trailing_slash || !metadata.is_file() {
        return http::build_404_response();
    }

    serve_file(ctx, state, &translated.fs_path).await
}

/// Directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        return http::build_redirect_response(&slash_location(ctx.path, ctx.query));
    }

    match find_index_file(dir, &state.config.index_files).await {
        Some(index) => serve_file(ctx, state, &index).await,
        None => listing::serve_listing(ctx, dir).await,
    }
}

/// Serve a regular file with its table content type
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    file_path: &Path,
) -> Response<Full<Bytes>> {
    let mut file = match File::open(file_path).await {
        Ok(f) => f,
        Err(e) if is_not_found(&e) => return http::build_404_response(),
        Err(e) => return read_failed(file_path, &e),
    };

    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => return read_failed(file_path, &e),
    };

    let last_modified = metadata.modified().ok().map(|mtime| {
        let not_modified = cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.if_none_match.as_deref(),
            mtime,
        );
        (cache::last_modified(mtime), not_modified)
    });
    if let Some((date, true)) = &last_modified {
        return http::build_304_response(date);
    }

    let mut content = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    if let Err(e) = file.read_to_end(&mut content).await {
        return read_failed(file_path, &e);
    }

    let content_type = state.content_types.for_path(file_path);
    http::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified.as_ref().map(|(date, _)| date.as_str()),
        ctx.is_head,
    )
}

/// First configured index file that exists as a regular file in `dir`
async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

/// `Location` for a directory requested without its trailing slash
fn slash_location(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{path}/?{q}"),
        None => format!("{path}/"),
    }
}

/// Errors a client sees as 404 rather than 500
fn is_not_found(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied)
}

fn read_failed(file_path: &Path, err: &std::io::Error) -> Response<Full<Bytes>> {
    logger::log_error(&format!(
        "Failed to read file '{}': {err}",
        file_path.display()
    ));
    http::build_500_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::http::mime::ContentTypeTable;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    struct Fixture {
        dir: tempfile::TempDir,
        state: AppState,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let state = AppState::new(
                ServerConfig::default().with_root(dir.path()),
                ContentTypeTable::default(),
            );
            Self { dir, state }
        }

        fn write(&self, name: &str, content: &[u8]) {
            let path = self.dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }

        async fn get(&self, path: &str) -> Response<Full<Bytes>> {
            self.get_with(path, None, None).await
        }

        async fn get_with(
            &self,
            path: &str,
            query: Option<&str>,
            if_modified_since: Option<String>,
        ) -> Response<Full<Bytes>> {
            let ctx = RequestContext {
                path,
                query,
                is_head: false,
                if_modified_since,
                if_none_match: None,
            };
            serve(&ctx, &self.state).await
        }
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_wasm_file() {
        let fx = Fixture::new();
        fx.write("app.wasm", b"\x00asm");

        let resp = fx.get("/app.wasm").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/wasm");
        assert!(resp.headers().contains_key("last-modified"));
        assert_eq!(body_of(resp).await, Bytes::from_static(b"\x00asm"));
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let fx = Fixture::new();
        fx.write("data.bin", b"\x01\x02");
        fx.write("LICENSE", b"MIT");

        let resp = fx.get("/data.bin").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/octet-stream");

        let resp = fx.get("/LICENSE").await;
        assert_eq!(resp.headers()["content-type"], "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let fx = Fixture::new();
        assert_eq!(fx.get("/missing.js").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(fx.get("/no/such/dir/").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash() {
        let fx = Fixture::new();
        fx.write("main.js", b"1");
        assert_eq!(fx.get("/main.js/").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_nested_and_encoded_paths() {
        let fx = Fixture::new();
        fx.write("assets/my icon.svg", b"<svg/>");

        let resp = fx.get("/assets/my%20icon.svg").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/svg+xml");
    }

    #[tokio::test]
    async fn test_traversal_stays_in_root() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), "secret").unwrap();
        let root = outer.path().join("www");
        std::fs::create_dir(&root).unwrap();
        let state = AppState::new(
            ServerConfig::default().with_root(&root),
            ContentTypeTable::default(),
        );

        for path in ["/../secret.txt", "/%2e%2e/secret.txt", "/a/../../secret.txt"] {
            let ctx = RequestContext {
                path,
                query: None,
                is_head: false,
                if_modified_since: None,
                if_none_match: None,
            };
            assert_eq!(serve(&ctx, &state).await.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_path() {
        let fx = Fixture::new();
        assert_eq!(fx.get("/%ff.js").await.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_directory_redirect() {
        let fx = Fixture::new();
        fx.write("docs/index.html", b"docs");

        let resp = fx.get("/docs").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/docs/");

        let resp = fx.get_with("/docs", Some("lang=en"), None).await;
        assert_eq!(resp.headers()["location"], "/docs/?lang=en");
    }

    #[tokio::test]
    async fn test_directory_index_files() {
        let fx = Fixture::new();
        fx.write("a/index.html", b"html");
        fx.write("a/index.htm", b"htm");
        fx.write("b/index.htm", b"htm");

        let resp = fx.get("/a/").await;
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(body_of(resp).await, Bytes::from_static(b"html"));

        let resp = fx.get("/b/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, Bytes::from_static(b"htm"));
    }

    #[tokio::test]
    async fn test_directory_listing() {
        let fx = Fixture::new();
        fx.write("files/b.css", b"");
        fx.write("files/A.js", b"");
        fx.write("files/sub/x", b"");

        let resp = fx.get("/files/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");
        let html = String::from_utf8(body_of(resp).await.to_vec()).unwrap();
        assert!(html.contains("Directory listing for /files/"));
        let a = html.find("A.js").unwrap();
        let b = html.find("b.css").unwrap();
        assert!(a < b);
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
    }

    #[tokio::test]
    async fn test_if_modified_since() {
        let fx = Fixture::new();
        fx.write("site.css", b"body {}");

        let resp = fx.get("/site.css").await;
        let stamp = resp.headers()["last-modified"].to_str().unwrap().to_string();

        let resp = fx.get_with("/site.css", None, Some(stamp)).await;
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert!(body_of(resp).await.is_empty());

        let resp = fx
            .get_with("/site.css", None, Some("Thu, 01 Jan 1970 00:00:00 GMT".into()))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_read_error_mapping() {
        use std::io;

        assert!(is_not_found(&io::Error::from(ErrorKind::NotFound)));
        assert!(is_not_found(&io::Error::from(ErrorKind::PermissionDenied)));
        assert!(!is_not_found(&io::Error::from(ErrorKind::Other)));
        assert!(!is_not_found(&io::Error::from(ErrorKind::UnexpectedEof)));

        let resp = read_failed(Path::new("broken.js"), &io::Error::from(ErrorKind::Other));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_special_file_not_served() {
        let fx = Fixture::new();
        let _socket =
            std::os::unix::net::UnixListener::bind(fx.dir.path().join("dev.sock")).unwrap();

        assert_eq!(fx.get("/dev.sock").await.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_slash_location() {
        assert_eq!(slash_location("/a", None), "/a/");
        assert_eq!(slash_location("/a", Some("x=1")), "/a/?x=1");
    }
}
