//! Chunk Store
//!
//! Appends chunk rows and hands out ordered iterators over them.

use bytes::Bytes;

use crate::backend::{Connection, SqlValue};
use crate::error::{Result, SqlFsError};
use crate::table::{TableName, ORDINAL_BASE, ORDINAL_COLUMN, PAYLOAD_COLUMN};

use super::ChunkIter;

/// Row operations for one file table
pub struct ChunkStore<'c, C: Connection + ?Sized> {
    conn: &'c C,
    name: TableName,
    /// Ordinal for the next append; `None` until `MAX(id)` has been read
    next_ordinal: Option<i64>,
}

impl<'c, C: Connection + ?Sized> ChunkStore<'c, C> {
    pub fn new(conn: &'c C, name: TableName) -> Self {
        Self {
            conn,
            name,
            next_ordinal: None,
        }
    }

    /// Append one chunk, returning the ordinal it was stored under
    ///
    /// The ordinal counter only advances after a successful insert, so a
    /// failed append is retried under the same ordinal.
    pub fn append(&mut self, payload: Bytes) -> Result<i64> {
        debug_assert!(!payload.is_empty(), "chunks are never empty");

        let ordinal = match self.next_ordinal {
            Some(ordinal) => ordinal,
            None => self.load_next_ordinal()?,
        };

        let sql = format!(
            "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
            self.name.quoted(),
            ORDINAL_COLUMN,
            PAYLOAD_COLUMN
        );
        let len = payload.len();
        self.conn
            .execute(&sql, &[SqlValue::Integer(ordinal), SqlValue::Blob(payload)])?;

        self.next_ordinal = Some(ordinal + 1);
        tracing::trace!("Appended chunk {} ({} bytes) to {}", ordinal, len, self.name);

        Ok(ordinal)
    }

    /// Start a fresh pass over the chunks, `batch` rows per round-trip
    pub fn iter(&self, batch: usize) -> ChunkIter<'c, C> {
        ChunkIter::new(self.conn, self.name.clone(), batch)
    }

    /// The table this store writes to
    pub fn name(&self) -> &TableName {
        &self.name
    }

    /// One greater than the current maximum ordinal, or the base for an empty table
    fn load_next_ordinal(&self) -> Result<i64> {
        let sql = format!("SELECT MAX({}) FROM {}", ORDINAL_COLUMN, self.name.quoted());
        let rows = self.conn.query(&sql, &[])?;

        match rows.into_iter().next().and_then(|row| row.into_iter().next()) {
            Some(SqlValue::Integer(max)) => Ok(max + 1),
            Some(SqlValue::Null) | None => Ok(ORDINAL_BASE),
            Some(other) => Err(SqlFsError::Backend(format!(
                "unexpected ordinal value in {}: {:?}",
                self.name, other
            ))),
        }
    }
}
