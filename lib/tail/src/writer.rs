use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, trace};

/// Appends `line` and a line terminator to the existing file at `path`
///
/// The record is written with a single call and flushed before the file is closed.
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> io::Result<()> {
    if line.contains('\n') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "line contains a line terminator",
        ));
    }

    let mut file = OpenOptions::new().append(true).open(path.as_ref())?;

    let mut record = String::with_capacity(line.len() + 1);
    record.push_str(line);
    record.push('\n');

    file.write_all(record.as_bytes())?;
    file.flush()?;
    trace!("appended {} bytes to {}", record.len(), path.as_ref().display());
    Ok(())
}

/// Creates an empty file at `path` if nothing exists there, returning whether it did
pub fn ensure_exists<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path.as_ref())
    {
        Ok(_) => {
            debug!("created {}", path.as_ref().display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}
