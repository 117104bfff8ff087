//! Logger module
//!
//! Provides logging utilities for the server:
//! - Startup line
//! - One access line per request
//! - Error and warning lines

mod format;
pub mod writer;

pub use format::AccessLogEntry;

/// Initialize the logger
///
/// Should be called once at application startup.
pub fn init() -> std::io::Result<()> {
    writer::init()
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(port: u16) {
    write_info(&format!("serving at port {port}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format());
}
