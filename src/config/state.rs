// Application state module
// Read-only state shared by every connection

use super::types::ServerConfig;
use crate::http::mime::ContentTypeTable;

/// Application state
///
/// Built once at startup and never mutated, so connections share it
/// through an `Arc` without locking.
pub struct AppState {
    pub config: ServerConfig,
    pub content_types: ContentTypeTable,
}

impl AppState {
    pub const fn new(config: ServerConfig, content_types: ContentTypeTable) -> Self {
        Self {
            config,
            content_types,
        }
    }
}
