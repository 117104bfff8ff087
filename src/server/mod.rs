// Server module entry point
// Owns the listening socket and runs the accept loop

pub mod connection;
pub mod listener;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{AppState, ServerConfig};
use crate::http::mime::ContentTypeTable;
use crate::logger;

pub use connection::accept_connection;
pub use listener::create_reusable_listener;

/// A bound static file server
///
/// Created once at startup; [`Server::run`] consumes it and serves until
/// the process is terminated.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the configured address.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(config: ServerConfig, content_types: ContentTypeTable) -> io::Result<Self> {
        let addr = config
            .get_socket_addr()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let listener = create_reusable_listener(addr)?;

        Ok(Self {
            listener,
            state: Arc::new(AppState::new(config, content_types)),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever
    ///
    /// Accept errors (e.g. running out of file descriptors) are logged and
    /// the loop carries on.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &self.state),
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            }
        }
    }
}
