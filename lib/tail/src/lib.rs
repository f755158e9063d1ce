//! Line oriented access to append-only log files
//!
//! [`TailReader`] returns the last lines of a file without scanning it from the
//! start, [`append_line`] adds a single record to the end of one.

pub use reader::{TailReader, DEFAULT_BYTES_PER_LINE, DEFAULT_MAX_ATTEMPTS};
pub use writer::{append_line, ensure_exists};

mod reader;
mod writer;
