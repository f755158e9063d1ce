use async_trait::async_trait;
use tokio::sync::Mutex;

use calculator_client::Calculation;

use crate::dao::{record, DaoError, HistoryDao};

pub struct HistoryDaoMemory {
    records: Mutex<Vec<Calculation>>,
}

impl HistoryDaoMemory {
    #[allow(dead_code)]
    pub fn new() -> HistoryDaoMemory {
        HistoryDaoMemory {
            records: Mutex::new(Default::default()),
        }
    }
}

#[async_trait]
impl HistoryDao for HistoryDaoMemory {
    async fn record(&self, calculation: &Calculation) -> Result<(), DaoError> {
        // Same restrictions as the file backed store
        record::encode(calculation)?;
        self.records.lock().await.push(calculation.clone());
        Ok(())
    }

    async fn recent(&self, count: usize) -> Result<Vec<Calculation>, DaoError> {
        let data = self.records.lock().await;
        let start = data.len().saturating_sub(count);
        Ok(data[start..].to_vec())
    }
}
