//! SqlFs Module
//!
//! File-level API over one backend connection.
//!
//! ## Responsibilities
//! - Bind a connection and a chunk layout (`Config`)
//! - Create/open/remove logical files by table name
//! - Hand out writer and reader sessions

use crate::backend::Connection;
use crate::config::Config;
use crate::error::Result;
use crate::stream::{ChunkReader, ChunkWriter};
use crate::table::{TableAdmin, TableStat};

/// Files-as-tables over a caller-supplied connection
///
/// The connection is borrowed, never owned: several `SqlFs` handles (and
/// any number of sequential sessions) may share it.
pub struct SqlFs<'c, C: Connection + ?Sized> {
    conn: &'c C,
    config: Config,
}

impl<'c, C: Connection + ?Sized> SqlFs<'c, C> {
    /// Bind a connection with the given chunk layout
    pub fn new(conn: &'c C, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { conn, config })
    }

    /// Bind a connection with the default chunk layout
    pub fn with_defaults(conn: &'c C) -> Self {
        Self {
            conn,
            config: Config::default(),
        }
    }

    /// Create a new file and return a writer for it
    pub fn create(&self, name: &str) -> Result<ChunkWriter<'c, C>> {
        ChunkWriter::create(self.conn, name, &self.config)
    }

    /// Create a file, replacing any existing file of the same name
    pub fn create_or_replace(&self, name: &str) -> Result<ChunkWriter<'c, C>> {
        ChunkWriter::create_or_replace(self.conn, name, &self.config)
    }

    /// Open an existing file for reading
    pub fn open(&self, name: &str) -> Result<ChunkReader<'c, C>> {
        ChunkReader::open(self.conn, name, &self.config)
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        self.admin().exists(name)
    }

    /// Remove a file; fails with `NotFound` if absent
    pub fn remove(&self, name: &str) -> Result<()> {
        self.admin().drop(name)
    }

    /// Remove a file if present; returns whether one was removed
    pub fn remove_if_exists(&self, name: &str) -> Result<bool> {
        self.admin().drop_if_exists(name)
    }

    /// Chunk count and byte length of a stored file
    pub fn stat(&self, name: &str) -> Result<TableStat> {
        self.admin().stat(name)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connection(&self) -> &'c C {
        self.conn
    }

    fn admin(&self) -> TableAdmin<'c, C> {
        TableAdmin::new(self.conn)
    }
}
