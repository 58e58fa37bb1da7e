//! Table administration
//!
//! DDL and metadata for file tables.

use crate::backend::Connection;
use crate::error::{Result, SqlFsError};

use super::{TableName, ORDINAL_COLUMN, PAYLOAD_COLUMN};

/// Size of a stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStat {
    /// Number of chunk rows
    pub chunks: u64,
    /// Total payload bytes across all chunks
    pub bytes: u64,
}

/// Creates, looks up, and drops file tables
pub struct TableAdmin<'c, C: Connection + ?Sized> {
    conn: &'c C,
}

impl<'c, C: Connection + ?Sized> TableAdmin<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Check whether a file table exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        self.exists_table(&TableName::parse(name)?)
    }

    /// Create an empty file table
    ///
    /// Fails with `AlreadyExists` if the table is already present.
    pub fn create(&self, name: &str) -> Result<()> {
        self.create_table(&TableName::parse(name)?)
    }

    /// Drop a file table and every chunk in it
    ///
    /// Fails with `NotFound` if the table is absent.
    pub fn drop(&self, name: &str) -> Result<()> {
        self.drop_table(&TableName::parse(name)?)
    }

    /// Drop a file table if present; returns whether anything was dropped
    pub fn drop_if_exists(&self, name: &str) -> Result<bool> {
        let name = TableName::parse(name)?;
        if !self.exists_table(&name)? {
            return Ok(false);
        }
        self.drop_table(&name)?;
        Ok(true)
    }

    /// Count chunks and payload bytes of a stored file
    pub fn stat(&self, name: &str) -> Result<TableStat> {
        self.stat_table(&TableName::parse(name)?)
    }

    // =========================================================================
    // Name-typed variants (used by the stream layer)
    // =========================================================================

    pub(crate) fn exists_table(&self, name: &TableName) -> Result<bool> {
        self.conn.table_exists(name)
    }

    pub(crate) fn create_table(&self, name: &TableName) -> Result<()> {
        if self.exists_table(name)? {
            return Err(SqlFsError::AlreadyExists(name.to_string()));
        }

        let sql = format!(
            "CREATE TABLE {} ({} INTEGER PRIMARY KEY, {} BLOB NOT NULL)",
            name.quoted(),
            ORDINAL_COLUMN,
            PAYLOAD_COLUMN
        );
        self.conn.execute(&sql, &[])?;

        tracing::debug!("Created file table {}", name);
        Ok(())
    }

    pub(crate) fn drop_table(&self, name: &TableName) -> Result<()> {
        if !self.exists_table(name)? {
            return Err(SqlFsError::NotFound(name.to_string()));
        }

        self.conn
            .execute(&format!("DROP TABLE {}", name.quoted()), &[])?;

        tracing::debug!("Dropped file table {}", name);
        Ok(())
    }

    pub(crate) fn stat_table(&self, name: &TableName) -> Result<TableStat> {
        if !self.exists_table(name)? {
            return Err(SqlFsError::NotFound(name.to_string()));
        }

        let sql = format!(
            "SELECT COUNT(*), COALESCE(SUM(LENGTH({})), 0) FROM {}",
            PAYLOAD_COLUMN,
            name.quoted()
        );
        let rows = self.conn.query(&sql, &[])?;

        let (chunks, bytes) = match rows.first().map(Vec::as_slice) {
            Some([count, total]) => (
                count.as_i64().unwrap_or(0),
                total.as_i64().unwrap_or(0),
            ),
            _ => {
                return Err(SqlFsError::Backend(format!(
                    "unexpected stat result shape for {}",
                    name
                )))
            }
        };

        Ok(TableStat {
            chunks: chunks.max(0) as u64,
            bytes: bytes.max(0) as u64,
        })
    }
}
