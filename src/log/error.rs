//! Session log error types.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// Failure of the durable log sink.
///
/// Every variant is fatal for the session: once the log cannot be written,
/// the session can no longer be reconstructed from it.
#[derive(Debug, Display, Error)]
pub enum LogError {
    /// The log file could not be created or truncated.
    #[display("Failed to open session log {}: {}", path.display(), source)]
    Open {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line could not be written or flushed.
    #[display("Failed to write session log {}: {}", path.display(), source)]
    Write {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An append was attempted after the log was closed.
    #[display("Session log {} is closed", path.display())]
    Closed {
        /// Log file path.
        #[error(not(source))]
        path: PathBuf,
    },
}
