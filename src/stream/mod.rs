//! Stream Module
//!
//! Byte-stream sessions over a chunked file table.
//!
//! ## Responsibilities
//! - `ChunkWriter`: accumulate bytes, flush every full chunk, flush the tail on close
//! - `ChunkReader`: pull chunks into a buffer, serve reads of any size
//! - `std::io::Write` / `std::io::Read` adapters so sessions plug into
//!   `BufReader`, `io::copy`, and friends
//!
//! ## Session States
//! ```text
//! Writer:  Open ──close()──▶ Closed
//!
//! Reader:  Open ──iterator drained──▶ Exhausted
//!            │                           │
//!            └────────close()───────────┴──▶ Closed
//! ```
//!
//! The only transition guard for flush/fetch is the buffer length compared
//! with the chunk capacity (writer) or the requested read size (reader).

mod reader;
mod writer;

pub use reader::{ChunkReader, ReaderState};
pub use writer::{ChunkWriter, WriterState};
