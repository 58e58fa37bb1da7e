//! Chunk Reader
//!
//! Serves reads of arbitrary size from a file's chunk rows.

use std::io;

use bytes::{Buf, BytesMut};

use crate::backend::Connection;
use crate::chunk::{ChunkIter, ChunkStore};
use crate::config::Config;
use crate::error::{Result, SqlFsError};
use crate::table::{TableAdmin, TableName};

/// Reader session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// More chunks may be fetched
    Open,
    /// Every chunk has been fetched; only the buffer remains
    Exhausted,
    Closed,
}

/// Sequential reader for one logical file
pub struct ChunkReader<'c, C: Connection + ?Sized> {
    name: TableName,
    chunks: ChunkIter<'c, C>,
    /// Fetched bytes not yet handed to the caller
    buffer: BytesMut,
    state: ReaderState,
    bytes_read: u64,
}

impl<'c, C: Connection + ?Sized> ChunkReader<'c, C> {
    /// Open an existing file table for reading
    ///
    /// Fails with `NotFound` if the table is absent.
    pub fn open(conn: &'c C, name: &str, config: &Config) -> Result<Self> {
        config.validate()?;
        let name = TableName::parse(name)?;
        if !TableAdmin::new(conn).exists_table(&name)? {
            return Err(SqlFsError::NotFound(name.to_string()));
        }

        tracing::debug!("Opened reader on {}", name);
        let chunks = ChunkStore::new(conn, name.clone()).iter(config.fetch_batch);

        Ok(Self {
            name,
            chunks,
            buffer: BytesMut::new(),
            state: ReaderState::Open,
            bytes_read: 0,
        })
    }

    /// Fill `buf` with the next bytes of the file
    ///
    /// Returns the number of bytes copied, which is less than `buf.len()`
    /// only when the file ends after them. Returns `EndOfStream` once the
    /// file is fully consumed (an empty `buf` always yields `Ok(0)`).
    ///
    /// If a chunk fetch fails after some bytes were copied, returns
    /// `PartialRead` carrying that count; the bytes in `buf[..bytes_read]`
    /// are valid. The failed chunk is fetched again by the next call.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.state == ReaderState::Closed {
            return Err(SqlFsError::Closed);
        }
        if buf.is_empty() {
            return Ok(0);
        }

        let mut fetch_error = None;
        while self.buffer.len() < buf.len() && self.state == ReaderState::Open {
            match self.chunks.next() {
                Some(Ok(payload)) => self.buffer.extend_from_slice(&payload),
                Some(Err(e)) => {
                    fetch_error = Some(e);
                    break;
                }
                None => self.state = ReaderState::Exhausted,
            }
        }

        let n = buf.len().min(self.buffer.len());
        buf[..n].copy_from_slice(&self.buffer[..n]);
        self.buffer.advance(n);
        self.bytes_read += n as u64;

        match fetch_error {
            Some(e) if n > 0 => Err(SqlFsError::PartialRead {
                bytes_read: n,
                source: Box::new(e),
            }),
            Some(e) => Err(e),
            None if n == 0 => Err(SqlFsError::EndOfStream),
            None => Ok(n),
        }
    }

    /// Append everything that is left to `out`, returning the bytes appended
    ///
    /// Bytes are appended as they are read, so on an error `out` still holds
    /// everything consumed before it (including the bytes of a
    /// `PartialRead`). Calling again resumes at the chunk that failed.
    pub fn read_to_end_into(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        let start = out.len();
        let mut scratch = vec![0u8; 64 * 1024];
        loop {
            match ChunkReader::read(self, &mut scratch) {
                Ok(n) => out.extend_from_slice(&scratch[..n]),
                Err(e) if e.is_end_of_stream() => return Ok(out.len() - start),
                Err(SqlFsError::PartialRead { bytes_read, source }) => {
                    out.extend_from_slice(&scratch[..bytes_read]);
                    return Err(SqlFsError::PartialRead { bytes_read, source });
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Release the buffer and the chunk iterator
    pub fn close(&mut self) -> Result<()> {
        if self.state == ReaderState::Closed {
            return Ok(());
        }

        self.chunks.close();
        self.buffer = BytesMut::new();
        self.state = ReaderState::Closed;

        tracing::debug!("Closed reader on {} after {} bytes", self.name, self.bytes_read);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The file table being read
    pub fn name(&self) -> &TableName {
        &self.name
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Bytes handed to the caller so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// True when no chunks remain and the buffer is empty
    pub fn is_exhausted(&self) -> bool {
        self.state == ReaderState::Exhausted && self.buffer.is_empty()
    }
}

impl<'c, C: Connection + ?Sized> io::Read for ChunkReader<'c, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match ChunkReader::read(self, buf) {
            Ok(n) => Ok(n),
            Err(SqlFsError::EndOfStream) => Ok(0),
            // The failed chunk is re-fetched next call, which reports the error
            Err(SqlFsError::PartialRead { bytes_read, .. }) => Ok(bytes_read),
            Err(e) => Err(e.into()),
        }
    }
}
