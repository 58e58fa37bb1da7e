//! # SqlFS
//!
//! Store arbitrarily large byte streams in SQL tables:
//! - One logical file = one table of `(id, block)` rows
//! - Fixed-size chunks with gap-free, strictly increasing ordinals
//! - Sequential write-then-read sessions with `std::io` adapters
//! - Any backend behind the `Connection` trait (SQLite built in)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          SqlFs                               │
//! │               (create / open / remove / stat)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ ChunkWriter │          │ ChunkReader │
//!   │ (buffer →   │          │ (fetch →    │
//!   │   flush)    │          │   drain)    │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ TableAdmin  │          │ ChunkStore  │
//!   │   (DDL)     │          │ (INSERT /   │
//!   │             │          │   SELECT)   │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌──────────────┐
//!               │  Connection  │
//!               │  (backend)   │
//!               └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sqlfs::{Config, SqlFs, SqliteConnection};
//!
//! # fn main() -> sqlfs::Result<()> {
//! let conn = SqliteConnection::open_in_memory()?;
//! let fs = SqlFs::new(&conn, Config::builder().chunk_capacity(4096).build()?)?;
//!
//! let mut writer = fs.create("model")?;
//! writer.write(b"hello, chunks")?;
//! writer.close()?;
//!
//! let mut reader = fs.open("model")?;
//! let mut back = Vec::new();
//! reader.read_to_end_into(&mut back)?;
//! assert_eq!(back, b"hello, chunks");
//! reader.close()?;
//!
//! fs.remove("model")?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod backend;
pub mod table;
pub mod chunk;
pub mod stream;
pub mod fs;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SqlFsError};
pub use config::Config;
pub use backend::{Connection, SqlValue, SqliteConnection};
pub use table::{TableAdmin, TableName, TableStat};
pub use chunk::{ChunkIter, ChunkStore};
pub use stream::{ChunkReader, ChunkWriter};
pub use fs::SqlFs;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SqlFS
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
