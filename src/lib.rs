//! devserve: serves the working directory over HTTP for local development.
//!
//! `/` is answered with `index_dist.html`; everything else maps onto files
//! under the root, typed through a fixed extension table.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::ServerConfig;
pub use http::mime::ContentTypeTable;
pub use server::Server;
