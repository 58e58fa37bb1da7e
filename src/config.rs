//! Configuration for SqlFS
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, SqlFsError};

/// Default chunk capacity: 32 KiB per row
pub const DEFAULT_CHUNK_CAPACITY: usize = 32 * 1024;

/// Default number of chunk rows fetched per reader round-trip
pub const DEFAULT_FETCH_BATCH: usize = 16;

/// Main configuration shared by writers and readers
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Chunk Layout
    // -------------------------------------------------------------------------
    /// Maximum payload size of one chunk row (in bytes).
    /// Every chunk except the last one of a file is exactly this long.
    pub chunk_capacity: usize,

    // -------------------------------------------------------------------------
    // Read Path
    // -------------------------------------------------------------------------
    /// How many chunk rows a reader pulls per SELECT
    pub fetch_batch: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            fetch_batch: DEFAULT_FETCH_BATCH,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        if self.chunk_capacity == 0 {
            return Err(SqlFsError::Config(
                "chunk_capacity must be greater than zero".to_string(),
            ));
        }
        if self.fetch_batch == 0 {
            return Err(SqlFsError::Config(
                "fetch_batch must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the chunk capacity (in bytes)
    pub fn chunk_capacity(mut self, bytes: usize) -> Self {
        self.config.chunk_capacity = bytes;
        self
    }

    /// Set the number of rows fetched per reader round-trip
    pub fn fetch_batch(mut self, rows: usize) -> Self {
        self.config.fetch_batch = rows;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
