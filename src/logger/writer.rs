//! Log writer module
//!
//! Serializes log lines from concurrent connections onto stdout (access and
//! info lines) and stderr (warnings and errors).

use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
}

impl LogTarget {
    fn write_line(&mut self, message: &str) {
        // A closed stream must not take the server down
        let _ = match self {
            Self::Stdout(out) => writeln!(out, "{message}").and_then(|()| out.flush()),
            Self::Stderr(err) => writeln!(err, "{message}"),
        };
    }
}

/// Thread-safe log writer
pub struct LogWriter {
    access: Mutex<LogTarget>,
    error: Mutex<LogTarget>,
}

impl LogWriter {
    fn new() -> Self {
        Self {
            access: Mutex::new(LogTarget::Stdout(io::stdout())),
            error: Mutex::new(LogTarget::Stderr(io::stderr())),
        }
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        if let Ok(mut target) = self.access.lock() {
            target.write_line(message);
        }
    }

    /// Write to error log
    pub fn write_error(&self, message: &str) {
        if let Ok(mut target) = self.error.lock() {
            target.write_line(message);
        }
    }
}

/// Initialize the global log writer
///
/// Called once at startup; a second call fails with `AlreadyExists`.
pub fn init() -> io::Result<()> {
    LOG_WRITER.set(LogWriter::new()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if `init()` has run
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
