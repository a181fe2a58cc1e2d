//! Append-only writer over the session log file.

use super::entry::LogEntry;
use super::error::LogError;
use crate::games::hanoi::Disc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Append-only session log.
///
/// The file is truncated when the log is opened and again on every new game.
/// Each line is flushed as it is written, so the file always holds the session
/// up to the last accepted event. The file handle is released by
/// [`SessionLog::close`] or, failing that, on drop.
#[derive(Debug)]
pub struct SessionLog {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl SessionLog {
    /// Creates (or truncates) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Open` if the file cannot be created. This is fatal:
    /// a session without its log cannot be replayed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let writer = Self::create(&path)?;
        info!("Session log opened");
        Ok(Self {
            path,
            writer: Some(writer),
        })
    }

    fn create(path: &Path) -> Result<BufWriter<File>, LogError> {
        File::create(path)
            .map(BufWriter::new)
            .map_err(|source| LogError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Closes and reopens the log, leaving only the disc count line.
    ///
    /// # Errors
    ///
    /// Returns `LogError` if the file cannot be reopened or written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn reset(&mut self, discs: Disc) -> Result<(), LogError> {
        self.close()?;
        self.writer = Some(Self::create(&self.path)?);
        self.append(&LogEntry::Start(discs))?;
        info!(discs, "Session log restarted");
        Ok(())
    }

    /// Appends one line and flushes it.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Closed` after [`SessionLog::close`], or
    /// `LogError::Write` if the line cannot be written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn append(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        let writer = self.writer.as_mut().ok_or_else(|| LogError::Closed {
            path: self.path.clone(),
        })?;

        writeln!(writer, "{}", entry)
            .and_then(|_| writer.flush())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(%entry, "Logged");
        Ok(())
    }

    /// Flushes and releases the file. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if buffered lines cannot be flushed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn close(&mut self) -> Result<(), LogError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })?;
            debug!("Session log closed");
        }
        Ok(())
    }

    /// Whether the log still accepts lines.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SessionLog {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "Failed to close session log");
        }
    }
}
