//! Chunk Writer
//!
//! Turns a sequence of write calls into capacity-sized chunk rows.

use std::io;

use bytes::BytesMut;

use crate::backend::Connection;
use crate::chunk::ChunkStore;
use crate::config::Config;
use crate::error::{Result, SqlFsError};
use crate::table::{TableAdmin, TableName};

/// Writer session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Open,
    Closed,
}

/// Sequential writer for one logical file
///
/// Bytes are buffered until a full chunk is available; every full chunk
/// is appended immediately. The final (possibly short) chunk is written by
/// [`close`](Self::close). Dropping an open writer loses buffered bytes.
pub struct ChunkWriter<'c, C: Connection + ?Sized> {
    store: ChunkStore<'c, C>,
    /// Bytes not yet flushed; never longer than `chunk_capacity`
    buffer: BytesMut,
    chunk_capacity: usize,
    state: WriterState,
    bytes_written: u64,
    chunks_written: u64,
}

impl<'c, C: Connection + ?Sized> ChunkWriter<'c, C> {
    /// Create a new file table and open a writer on it
    ///
    /// Fails with `AlreadyExists` if the table is present.
    pub fn create(conn: &'c C, name: &str, config: &Config) -> Result<Self> {
        config.validate()?;
        let name = TableName::parse(name)?;
        TableAdmin::new(conn).create_table(&name)?;
        Ok(Self::new(conn, name, config))
    }

    /// Like [`create`](Self::create), but drops an existing table first
    pub fn create_or_replace(conn: &'c C, name: &str, config: &Config) -> Result<Self> {
        config.validate()?;
        let name = TableName::parse(name)?;
        let admin = TableAdmin::new(conn);
        if admin.exists_table(&name)? {
            admin.drop_table(&name)?;
        }
        admin.create_table(&name)?;
        Ok(Self::new(conn, name, config))
    }

    fn new(conn: &'c C, name: TableName, config: &Config) -> Self {
        tracing::debug!(
            "Opened writer on {} (chunk capacity {} bytes)",
            name,
            config.chunk_capacity
        );
        Self {
            store: ChunkStore::new(conn, name),
            buffer: BytesMut::with_capacity(config.chunk_capacity),
            chunk_capacity: config.chunk_capacity,
            state: WriterState::Open,
            bytes_written: 0,
            chunks_written: 0,
        }
    }

    /// Write `data`, flushing every chunk that fills up
    ///
    /// Returns the number of bytes accepted, persisted or buffered. This is
    /// `data.len()` unless a chunk append fails after this call accepted
    /// some bytes: then the count so far is returned as a short write and
    /// the failing chunk stays buffered, to be retried by the next `write`
    /// or `close`. A failure before any byte was accepted is returned as
    /// the error. Chunks appended before a failure stay persisted.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        if self.state == WriterState::Closed {
            return Err(SqlFsError::Closed);
        }
        if data.is_empty() {
            return Ok(0);
        }

        let mut accepted = 0;
        loop {
            // Full chunks go out first, including one kept by a failed append
            if self.buffer.len() == self.chunk_capacity {
                if let Err(e) = self.flush_chunk() {
                    return if accepted > 0 { Ok(accepted) } else { Err(e) };
                }
            }
            if accepted == data.len() {
                break;
            }

            let take = (self.chunk_capacity - self.buffer.len()).min(data.len() - accepted);
            self.buffer.extend_from_slice(&data[accepted..accepted + take]);
            self.bytes_written += take as u64;
            accepted += take;
        }

        Ok(accepted)
    }

    /// Flush the buffered tail as the final chunk and close the session
    ///
    /// On failure the writer stays open with the tail still buffered.
    /// Closing a closed writer does nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.state == WriterState::Closed {
            return Ok(());
        }

        if !self.buffer.is_empty() {
            self.flush_chunk()?;
        }

        self.buffer = BytesMut::new();
        self.state = WriterState::Closed;

        tracing::debug!(
            "Closed writer on {}: {} bytes in {} chunks",
            self.store.name(),
            self.bytes_written,
            self.chunks_written
        );
        Ok(())
    }

    /// Append the whole buffer as one chunk
    fn flush_chunk(&mut self) -> Result<()> {
        let chunk = self.buffer.split().freeze();

        if let Err(e) = self.store.append(chunk.clone()) {
            // Put the bytes back so nothing is lost
            self.buffer.extend_from_slice(&chunk);
            tracing::warn!("Chunk append to {} failed: {}", self.store.name(), e);
            return Err(e);
        }

        self.chunks_written += 1;
        self.buffer.reserve(self.chunk_capacity);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The file table being written
    pub fn name(&self) -> &TableName {
        self.store.name()
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Bytes accepted so far (persisted or buffered)
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Chunks appended so far
    pub fn chunks_written(&self) -> u64 {
        self.chunks_written
    }

    /// Bytes buffered and not yet persisted
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

impl<'c, C: Connection + ?Sized> io::Write for ChunkWriter<'c, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ChunkWriter::write(self, buf).map_err(io::Error::from)
    }

    /// No-op: a partial chunk is only persisted by `close`
    fn flush(&mut self) -> io::Result<()> {
        if self.state == WriterState::Closed {
            return Err(SqlFsError::Closed.into());
        }
        Ok(())
    }
}

impl<'c, C: Connection + ?Sized> Drop for ChunkWriter<'c, C> {
    fn drop(&mut self) {
        if self.state == WriterState::Open && !self.buffer.is_empty() {
            tracing::warn!(
                "Writer on {} dropped without close; {} buffered bytes lost",
                self.store.name(),
                self.buffer.len()
            );
        }
    }
}
