use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, trace};

/// Estimated size of a line, used to size the first read window
pub const DEFAULT_BYTES_PER_LINE: u64 = 32;

/// Number of growing reads attempted before falling back to reading the whole file
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Reads the trailing lines of a file by reading a window at its end, growing the
/// window until it contains enough complete lines or reaches the start of the file
#[derive(Debug, Clone, Copy)]
pub struct TailReader {
    bytes_per_line: u64,
    max_attempts: u32,
}

impl Default for TailReader {
    fn default() -> Self {
        TailReader::new(DEFAULT_BYTES_PER_LINE, DEFAULT_MAX_ATTEMPTS)
    }
}

impl TailReader {
    pub fn new(bytes_per_line: u64, max_attempts: u32) -> TailReader {
        TailReader {
            bytes_per_line: bytes_per_line.max(1),
            max_attempts,
        }
    }

    /// Returns up to the last `n` lines of the file at `path`, newest last
    pub fn last_lines_in_file<P: AsRef<Path>>(
        &self,
        n: usize,
        path: P,
    ) -> io::Result<Vec<String>> {
        let mut file = File::open(path)?;
        self.last_lines(n, &mut file)
    }

    /// Returns up to the last `n` lines of `reader`, newest last
    ///
    /// Fewer than `n` lines are returned when the whole input holds fewer.
    /// A trailing line terminator does not produce an empty line.
    pub fn last_lines<R: Read + Seek>(
        &self,
        n: usize,
        reader: &mut R,
    ) -> io::Result<Vec<String>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let size = reader.seek(SeekFrom::End(0))?;
        let mut multiplier: u64 = 1;
        let mut attempt = 0;

        loop {
            let window = if attempt < self.max_attempts {
                multiplier
                    .saturating_mul(n as u64)
                    .saturating_mul(self.bytes_per_line)
            } else {
                size
            };
            let start = size.saturating_sub(window);
            trace!(
                "tail attempt {} reading {} bytes from offset {}",
                attempt,
                size - start,
                start
            );

            let buf = read_window(reader, start, size - start)?;
            let mut lines: Vec<&[u8]> = buf.split(|b| *b == b'\n').collect();

            if start > 0 {
                // The window may begin part way through a line
                lines.remove(0);
            }

            if lines.last().map_or(false, |l| l.is_empty()) {
                lines.pop();
            }

            if lines.len() >= n {
                debug!("tail found {} lines after {} attempts", n, attempt + 1);
                return decode(&lines[lines.len() - n..]);
            }

            if start == 0 {
                debug!("tail reached start of file with {} lines", lines.len());
                return decode(&lines);
            }

            multiplier = multiplier.saturating_mul(2);
            attempt += 1;
        }
    }
}

fn read_window<R: Read + Seek>(reader: &mut R, start: u64, len: u64) -> io::Result<Vec<u8>> {
    let len = usize::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "read window too large"))?;
    let mut buf = vec![0; len];
    reader.seek(SeekFrom::Start(start))?;
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn decode(lines: &[&[u8]]) -> io::Result<Vec<String>> {
    lines
        .iter()
        .map(|l| {
            String::from_utf8(l.to_vec())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}
