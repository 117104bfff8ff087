// Configuration types module
// Server settings are fixed constants; there is no config file, flag or env lookup

use std::net::SocketAddr;
use std::path::PathBuf;

use super::{DEFAULT_HOST, DEFAULT_PORT, INDEX_FILES, ROOT_DOCUMENT};

/// Settings for a single server instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory all request paths resolve against
    pub root: PathBuf,
    /// File served for a request to `/`
    pub root_document: String,
    pub index_files: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            root_document: ROOT_DOCUMENT.to_string(),
            index_files: INDEX_FILES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ServerConfig {
    /// Default settings rooted at the process working directory at launch
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self {
            root: std::env::current_dir()?,
            ..Self::default()
        })
    }

    /// Same settings serving `root` instead
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Same settings on `host:port` instead
    #[must_use]
    pub fn with_addr(mut self, host: &str, port: u16) -> Self {
        self.host = host.to_string();
        self.port = port;
        self
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
