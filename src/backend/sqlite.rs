//! SQLite backend
//!
//! `Connection` implementation over `rusqlite`.

use std::path::Path;

use bytes::Bytes;
use parking_lot::Mutex;
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

use crate::error::Result;
use crate::table::TableName;

use super::{Connection, Row, SqlValue};

/// SQLite connection usable from several threads
///
/// `rusqlite::Connection` is `Send` but not `Sync`; statements are
/// serialized through a mutex so one handle can back many files.
pub struct SqliteConnection {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteConnection {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self> {
        let conn = rusqlite::Connection::open(path)?;
        tracing::debug!("Opened SQLite database at {}", path.display());
        Ok(Self::from_rusqlite(conn))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory()?;
        Ok(Self::from_rusqlite(conn))
    }

    /// Wrap an already-configured rusqlite connection
    pub fn from_rusqlite(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl Connection for SqliteConnection {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        let conn = self.conn.lock();
        let affected = conn.execute(sql, rusqlite::params_from_iter(params.iter()))?;
        Ok(affected)
    }

    fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let col_count = stmt.column_count();

        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            let mut values = Vec::with_capacity(col_count);
            for i in 0..col_count {
                values.push(match row.get_ref(i)? {
                    ValueRef::Null => SqlValue::Null,
                    ValueRef::Integer(v) => SqlValue::Integer(v),
                    ValueRef::Real(v) => SqlValue::Real(v),
                    ValueRef::Text(v) => SqlValue::Text(String::from_utf8_lossy(v).into_owned()),
                    ValueRef::Blob(v) => SqlValue::Blob(Bytes::copy_from_slice(v)),
                });
            }
            Ok(values)
        })?;

        let rows = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn table_exists(&self, name: &TableName) -> Result<bool> {
        // sqlite_master lives in every attached schema
        let master = match name.schema() {
            Some(schema) => format!("\"{}\".sqlite_master", schema),
            None => "sqlite_master".to_string(),
        };
        // SQLite resolves table names case-insensitively
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            master
        );

        let conn = self.conn.lock();
        let count: i64 = conn.query_row(&sql, [name.table()], |row| row.get(0))?;
        Ok(count > 0)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            SqlValue::Integer(v) => ToSqlOutput::Borrowed(ValueRef::Integer(*v)),
            SqlValue::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
            SqlValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            SqlValue::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
        })
    }
}
