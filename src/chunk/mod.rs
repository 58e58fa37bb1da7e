//! Chunk Module
//!
//! Row-level access to the chunks of one file.
//!
//! ## Responsibilities
//! - Append a chunk with the next gap-free ordinal
//! - Iterate chunk payloads in ordinal order, lazily, one page at a time
//!
//! ## Ordering
//! Ordinals start at [`ORDINAL_BASE`](crate::table::ORDINAL_BASE) and grow
//! by exactly one per append. A file's content is the concatenation of its
//! payloads in ordinal order. Only one writer per file is supported; two
//! concurrent stores on the same table race on ordinal assignment.

mod iter;
mod store;

pub use iter::ChunkIter;
pub use store::ChunkStore;
