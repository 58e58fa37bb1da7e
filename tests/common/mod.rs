//! Shared helpers for SqlFS integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use sqlfs::backend::Row;
use sqlfs::{ChunkReader, Connection, Result, SqlFsError, SqlValue, SqliteConnection, TableName};

// =============================================================================
// Helper Functions
// =============================================================================

pub fn memory_conn() -> SqliteConnection {
    SqliteConnection::open_in_memory().unwrap()
}

/// Deterministic, non-repeating-looking test payload
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Payload length of every chunk row, in ordinal order
pub fn chunk_lengths<C: Connection + ?Sized>(conn: &C, table: &str) -> Vec<usize> {
    let sql = format!("SELECT LENGTH(block) FROM \"{}\" ORDER BY id", table);
    conn.query(&sql, &[])
        .unwrap()
        .into_iter()
        .map(|row| row[0].as_i64().unwrap() as usize)
        .collect()
}

/// Every ordinal in the table, ascending
pub fn ordinals<C: Connection + ?Sized>(conn: &C, table: &str) -> Vec<i64> {
    let sql = format!("SELECT id FROM \"{}\" ORDER BY id", table);
    conn.query(&sql, &[])
        .unwrap()
        .into_iter()
        .map(|row| row[0].as_i64().unwrap())
        .collect()
}

/// Read the rest of a file, failing the test on any error
pub fn read_all<C: Connection + ?Sized>(reader: &mut ChunkReader<'_, C>) -> Vec<u8> {
    let mut out = Vec::new();
    reader.read_to_end_into(&mut out).unwrap();
    out
}

// =============================================================================
// Fault Injection
// =============================================================================

/// SQLite connection that fails selected chunk fetches and inserts
///
/// Calls are numbered from 1 per kind; each listed number fails exactly once.
pub struct FlakyConnection {
    inner: SqliteConnection,
    fetches: AtomicUsize,
    inserts: AtomicUsize,
    fail_fetches: Mutex<HashSet<usize>>,
    fail_inserts: Mutex<HashSet<usize>>,
}

impl FlakyConnection {
    pub fn new() -> Self {
        Self {
            inner: memory_conn(),
            fetches: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            fail_fetches: Mutex::new(HashSet::new()),
            fail_inserts: Mutex::new(HashSet::new()),
        }
    }

    /// Fail the n-th chunk fetch (counting from now on)
    pub fn fail_fetch(&self, n: usize) {
        let base = self.fetches.load(Ordering::SeqCst);
        self.fail_fetches.lock().insert(base + n);
    }

    /// Fail the n-th chunk insert (counting from now on)
    pub fn fail_insert(&self, n: usize) {
        let base = self.inserts.load(Ordering::SeqCst);
        self.fail_inserts.lock().insert(base + n);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Connection for FlakyConnection {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        if sql.starts_with("INSERT") {
            let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_inserts.lock().remove(&n) {
                return Err(SqlFsError::Backend(format!("injected insert failure #{}", n)));
            }
        }
        self.inner.execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        if sql.starts_with("SELECT id, block") {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_fetches.lock().remove(&n) {
                return Err(SqlFsError::Backend(format!("injected fetch failure #{}", n)));
            }
        }
        self.inner.query(sql, params)
    }

    fn table_exists(&self, name: &TableName) -> Result<bool> {
        self.inner.table_exists(name)
    }
}
