use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use calculator_client::Calculation;
use tail::TailReader;
use telemetry::Measure;

use crate::dao::{record, DaoError, HistoryConfig, HistoryDao};

lazy_static! {
    static ref RECORD_MEASURE: Measure = Measure::new("dao", "history_record");
    static ref RECENT_MEASURE: Measure = Measure::new("dao", "history_recent");
}

/// History kept in a line oriented log file
///
/// The file is opened for the duration of each call only. Appends are not
/// coordinated between concurrent writers.
pub struct HistoryDaoFile {
    path: PathBuf,
    reader: TailReader,
}

impl HistoryDaoFile {
    pub fn new(config: &HistoryConfig) -> HistoryDaoFile {
        HistoryDaoFile {
            path: config.path.clone(),
            reader: config.tail_reader(),
        }
    }
}

#[async_trait]
impl HistoryDao for HistoryDaoFile {
    async fn record(&self, calculation: &Calculation) -> Result<(), DaoError> {
        let line = record::encode(calculation)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            RECORD_MEASURE.time(|| tail::append_line(&path, &line).map_err(DaoError::from))
        })
        .await?
    }

    async fn recent(&self, count: usize) -> Result<Vec<Calculation>, DaoError> {
        let path = self.path.clone();
        let reader = self.reader;

        tokio::task::spawn_blocking(move || {
            RECENT_MEASURE.time(|| -> Result<Vec<Calculation>, DaoError> {
                let lines = reader.last_lines_in_file(count, &path)?;
                debug!("read {} history records", lines.len());
                lines.iter().map(|line| record::decode(line)).collect()
            })
        })
        .await?
    }
}
