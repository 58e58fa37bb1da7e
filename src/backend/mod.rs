//! Backend Module
//!
//! The seam between the chunking engine and a SQL database.
//!
//! ## Responsibilities
//! - Execute parameterized DDL/DML statements
//! - Run parameterized queries and return rows
//! - Answer "does this table exist?" from backend metadata
//!
//! The engine only speaks standard SQL through this trait
//! (CREATE/DROP TABLE, INSERT, SELECT ... ORDER BY). Everything
//! dialect-specific (metadata lookup, driver types) stays behind it.

mod sqlite;

use bytes::Bytes;

use crate::error::Result;
use crate::table::TableName;

pub use sqlite::SqliteConnection;

/// A single SQL value, as bound into a statement or read out of a row
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Bytes),
}

impl SqlValue {
    /// Integer value, if this is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Blob payload, if this is a blob
    pub fn into_blob(self) -> Option<Bytes> {
        match self {
            SqlValue::Blob(b) => Some(b),
            _ => None,
        }
    }
}

/// One result row, columns in SELECT order
pub type Row = Vec<SqlValue>;

/// A synchronous SQL connection
///
/// Every method blocks until the backend answers. Implementations map
/// driver failures to [`SqlFsError::Backend`](crate::SqlFsError::Backend).
pub trait Connection {
    /// Execute a statement that returns no rows, returning affected row count
    fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize>;

    /// Execute a query and collect its rows
    fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>>;

    /// Check backend metadata for a table with this name
    fn table_exists(&self, name: &TableName) -> Result<bool>;
}
