//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from filesystem handling.

pub mod cache;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_400_response, build_404_response, build_405_response,
    build_500_response, build_file_response, build_html_response, build_redirect_response,
};
