// Configuration module entry point
// Fixed server settings and the shared runtime state built from them

mod state;
mod types;

pub use state::AppState;
pub use types::ServerConfig;

/// Port the server listens on
pub const DEFAULT_PORT: u16 = 8080;

/// Bind address (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Document served in place of `/`
pub const ROOT_DOCUMENT: &str = "index_dist.html";

/// Index files tried, in order, for directory requests
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Value of the `Server` response header
pub const SERVER_NAME: &str = concat!("devserve/", env!("CARGO_PKG_VERSION"));
