//! Error types for SqlFS
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SqlFsError
pub type Result<T> = std::result::Result<T, SqlFsError>;

/// Unified error type for SqlFS operations
#[derive(Debug, Error)]
pub enum SqlFsError {
    // -------------------------------------------------------------------------
    // Table Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Table not found: {0}")]
    NotFound(String),

    #[error("Table already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid table name: {0}")]
    InvalidName(String),

    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    #[error("Backend error: {0}")]
    Backend(String),

    // -------------------------------------------------------------------------
    // Stream Errors
    // -------------------------------------------------------------------------
    /// Control signal: the file content has been fully consumed.
    #[error("End of stream")]
    EndOfStream,

    /// A chunk fetch failed after `bytes_read` bytes were already copied
    /// into the caller's buffer during the same read call.
    #[error("Read interrupted after {bytes_read} bytes: {source}")]
    PartialRead {
        bytes_read: usize,
        #[source]
        source: Box<SqlFsError>,
    },

    #[error("Stream already closed")]
    Closed,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for SqlFsError {
    fn from(e: rusqlite::Error) -> Self {
        SqlFsError::Backend(e.to_string())
    }
}

impl SqlFsError {
    /// True for the end-of-stream control signal
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SqlFsError::EndOfStream)
    }
}

impl From<SqlFsError> for std::io::Error {
    fn from(e: SqlFsError) -> Self {
        use std::io::ErrorKind;
        match e {
            SqlFsError::Io(io) => io,
            SqlFsError::NotFound(_) => std::io::Error::new(ErrorKind::NotFound, e),
            SqlFsError::AlreadyExists(_) => std::io::Error::new(ErrorKind::AlreadyExists, e),
            SqlFsError::InvalidName(_) | SqlFsError::Config(_) => {
                std::io::Error::new(ErrorKind::InvalidInput, e)
            }
            SqlFsError::EndOfStream => std::io::Error::new(ErrorKind::UnexpectedEof, e),
            other => std::io::Error::new(ErrorKind::Other, other),
        }
    }
}
