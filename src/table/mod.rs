//! Table Module
//!
//! One logical file is one table.
//!
//! ## Responsibilities
//! - Validate and quote caller-supplied table names
//! - Existence check, creation, and destruction of file tables
//! - Size statistics for an existing file
//!
//! ## Table Layout
//! ```text
//! ┌──────────────────────────┬─────────────────────────────┐
//! │ id INTEGER PRIMARY KEY   │ block BLOB NOT NULL         │
//! ├──────────────────────────┼─────────────────────────────┤
//! │ 1                        │ chunk_capacity bytes        │
//! │ 2                        │ chunk_capacity bytes        │
//! │ ...                      │ ...                         │
//! │ n                        │ 1..=chunk_capacity bytes    │
//! └──────────────────────────┴─────────────────────────────┘
//! ```

mod admin;
mod name;

pub use admin::{TableAdmin, TableStat};
pub use name::{TableName, MAX_SEGMENT_LEN};

/// Ordinal column (strictly increasing, primary key)
pub(crate) const ORDINAL_COLUMN: &str = "id";

/// Payload column (variable-length binary)
pub(crate) const PAYLOAD_COLUMN: &str = "block";

/// Ordinal assigned to the first chunk of a file
pub const ORDINAL_BASE: i64 = 1;
