//! Directory listing module
//!
//! Renders an HTML index for directories that have no index file.

use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write;
use std::io;
use std::path::Path;
use tokio::fs;

/// One directory entry as shown in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// Directory, following symlinks
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Text shown for the entry: `name/` for directories, `name@` for symlinks
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Relative link target
    fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }
}

/// Serve a listing of `dir`, or 404 when it cannot be read
pub async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match read_entries(dir).await {
        Ok(entries) => {
            let display_path = urlencoding::decode(ctx.path)
                .map_or_else(|_| ctx.path.to_string(), |p| p.into_owned());
            http::build_html_response(render_listing(&display_path, &entries), ctx.is_head)
        }
        Err(e) => {
            logger::log_warning(&format!(
                "No permission to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response()
        }
    }
}

/// Read `dir` sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry.file_type().await?.is_symlink();
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.href()),
            escape_html(&entry.display_name())
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_render_entries() {
        let html = render_listing(
            "/pkg/",
            &[
                entry("app.js", false, false),
                entry("assets", true, false),
                entry("latest", true, true),
            ],
        );
        assert!(html.contains("<title>Directory listing for /pkg/</title>"));
        assert!(html.contains("<li><a href=\"app.js\">app.js</a></li>"));
        assert!(html.contains("<li><a href=\"assets/\">assets/</a></li>"));
        assert!(html.contains("<li><a href=\"latest/\">latest@</a></li>"));
    }

    #[test]
    fn test_render_escapes() {
        let html = render_listing("/<x>/", &[entry("a&b <c>.html", false, false)]);
        assert!(html.contains("Directory listing for /&lt;x&gt;/"));
        assert!(html.contains("href=\"a%26b%20%3Cc%3E.html\""));
        assert!(html.contains(">a&amp;b &lt;c&gt;.html</a>"));
    }

    #[tokio::test]
    async fn test_read_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("beta.css"), "").unwrap();
        std::fs::write(dir.path().join("Alpha.js"), "").unwrap();
        std::fs::create_dir(dir.path().join("gamma")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha.js", "beta.css", "gamma"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[tokio::test]
    async fn test_read_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(&dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_unreadable_dir_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RequestContext {
            path: "/gone/",
            query: None,
            is_head: false,
            if_modified_since: None,
            if_none_match: None,
        };

        let resp = serve_listing(&ctx, &dir.path().join("gone")).await;
        assert_eq!(resp.status(), hyper::StatusCode::NOT_FOUND);
    }
}
