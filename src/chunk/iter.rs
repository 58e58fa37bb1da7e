//! Chunk Iterator
//!
//! Sequential, pull-based iteration over a file's chunks in ordinal order.

use std::collections::VecDeque;

use bytes::Bytes;

use crate::backend::{Connection, SqlValue};
use crate::error::{Result, SqlFsError};
use crate::table::{TableName, ORDINAL_COLUMN, PAYLOAD_COLUMN};

/// Lazy iterator over chunk payloads
///
/// Pages through the table with keyset pagination
/// (`WHERE id > last ORDER BY id LIMIT batch`), so no backend cursor is
/// held between calls. A failed page fetch leaves the position untouched:
/// the next call fetches the same chunks again.
pub struct ChunkIter<'c, C: Connection + ?Sized> {
    conn: &'c C,
    name: TableName,
    /// Rows per SELECT
    batch: usize,
    /// Highest ordinal fetched so far (`None` before the first page)
    last_ordinal: Option<i64>,
    /// Fetched but not yet yielded payloads
    pending: VecDeque<Bytes>,
    /// Set once a short page shows there is nothing left to fetch
    drained: bool,
    /// Set by `close()`; a closed iterator yields nothing
    closed: bool,
}

impl<'c, C: Connection + ?Sized> ChunkIter<'c, C> {
    pub(crate) fn new(conn: &'c C, name: TableName, batch: usize) -> Self {
        Self {
            conn,
            name,
            batch: batch.max(1),
            last_ordinal: None,
            pending: VecDeque::new(),
            drained: false,
            closed: false,
        }
    }

    /// True once every chunk has been yielded (or the iterator was closed)
    pub fn is_exhausted(&self) -> bool {
        self.closed || (self.drained && self.pending.is_empty())
    }

    /// Release fetched-but-unread payloads and stop iterating
    pub fn close(&mut self) {
        self.pending.clear();
        self.closed = true;
    }

    /// Fetch the next page into `pending`
    fn fetch_page(&mut self) -> Result<()> {
        let sql = format!(
            "SELECT {ord}, {payload} FROM {table} WHERE {ord} > ?1 ORDER BY {ord} LIMIT ?2",
            ord = ORDINAL_COLUMN,
            payload = PAYLOAD_COLUMN,
            table = self.name.quoted()
        );
        let params = [
            SqlValue::Integer(self.last_ordinal.unwrap_or(i64::MIN)),
            SqlValue::Integer(self.batch as i64),
        ];

        let rows = match self.conn.query(&sql, &params) {
            Ok(rows) => rows,
            Err(e) if self.last_ordinal.is_none() => {
                // First fetch: a missing table is NotFound, not a backend fault
                return match self.conn.table_exists(&self.name) {
                    Ok(false) => Err(SqlFsError::NotFound(self.name.to_string())),
                    _ => Err(e),
                };
            }
            Err(e) => return Err(e),
        };

        // Decode the whole page before committing any state
        let mut page = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cols = row.into_iter();
            let ordinal = cols.next().as_ref().and_then(SqlValue::as_i64);
            let payload = cols.next().and_then(SqlValue::into_blob);
            match (ordinal, payload) {
                (Some(ordinal), Some(payload)) => page.push((ordinal, payload)),
                _ => {
                    return Err(SqlFsError::Backend(format!(
                        "malformed chunk row in {}",
                        self.name
                    )))
                }
            }
        }

        if page.len() < self.batch {
            self.drained = true;
        }
        if let Some((ordinal, _)) = page.last() {
            self.last_ordinal = Some(*ordinal);
        } else if self.last_ordinal.is_none() {
            // Empty table; remember that the first fetch happened
            self.last_ordinal = Some(i64::MIN);
        }

        tracing::trace!("Fetched {} chunks from {}", page.len(), self.name);
        self.pending
            .extend(page.into_iter().map(|(_, payload)| payload));
        Ok(())
    }
}

impl<'c, C: Connection + ?Sized> Iterator for ChunkIter<'c, C> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }

        loop {
            if let Some(payload) = self.pending.pop_front() {
                // Skip zero-length rows; they carry no content
                if payload.is_empty() {
                    continue;
                }
                return Some(Ok(payload));
            }

            if self.drained {
                return None;
            }

            if let Err(e) = self.fetch_page() {
                return Some(Err(e));
            }
        }
    }
}
