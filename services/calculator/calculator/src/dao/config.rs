use std::path::PathBuf;

use serde::Deserialize;

use tail::{TailReader, DEFAULT_BYTES_PER_LINE, DEFAULT_MAX_ATTEMPTS};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub default_lines: usize,
    pub bytes_per_line: u64,
    pub max_attempts: u32,
}

impl Default for HistoryConfig {
    fn default() -> HistoryConfig {
        HistoryConfig {
            path: PathBuf::from("histories.db"),
            default_lines: 5,
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl HistoryConfig {
    pub fn tail_reader(&self) -> TailReader {
        TailReader::new(self.bytes_per_line, self.max_attempts)
    }
}
