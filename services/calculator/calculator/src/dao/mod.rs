use async_trait::async_trait;

use calculator_client::Calculation;

pub use self::config::HistoryConfig;
pub use error::DaoError;
pub use file::HistoryDaoFile;
#[cfg(test)]
pub use memory::HistoryDaoMemory;

mod config;
mod error;
mod file;
#[cfg(test)]
mod memory;
mod record;

/// Append-only store of evaluated expressions
#[async_trait]
pub trait HistoryDao: Sync + Send {
    async fn record(&self, calculation: &Calculation) -> Result<(), DaoError>;

    /// Returns at most `count` of the latest calculations, newest last
    async fn recent(&self, count: usize) -> Result<Vec<Calculation>, DaoError>;
}
