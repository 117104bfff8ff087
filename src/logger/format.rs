//! Access log format module
//!
//! Renders one request in the Common Log Format:
//! `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`

use chrono::{DateTime, Local};
use hyper::Version;

/// Access log entry for a single request/response pair
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address, `-` when unknown
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    /// Request target as received, query included
    pub target: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    pub status: u16,
    /// Response body size in bytes; `None` renders as `-`
    pub body_bytes: Option<u64>,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: Option<std::net::SocketAddr>, method: String, target: String) -> Self {
        Self {
            remote_addr: remote_addr.map_or_else(|| "-".to_string(), |a| a.ip().to_string()),
            time: Local::now(),
            method,
            target,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.http_version = version_str(version).to_string();
        self
    }

    /// Render as a Common Log Format line
    pub fn format(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.target,
            self.http_version,
            self.status,
            self.body_bytes
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        )
    }
}

const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
