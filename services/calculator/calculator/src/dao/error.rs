use derive_more::Display;
use tokio::task::JoinError;

use telemetry::IsErr;

#[derive(Debug, Display)]
pub enum DaoError {
    #[display(fmt = "Invalid Record: {}", _0)]
    InvalidRecord(String),

    #[display(fmt = "Corrupt Record: \"{}\"", _0)]
    Corrupt(String),

    #[display(fmt = "IO Error: {}", _0)]
    IOError(String),

    #[display(fmt = "Internal Error: {}", _0)]
    InternalError(String),
}

impl std::error::Error for DaoError {}

impl IsErr for DaoError {
    fn is_err(&self) -> bool {
        !matches!(self, DaoError::InvalidRecord(_))
    }
}

impl From<std::io::Error> for DaoError {
    fn from(e: std::io::Error) -> Self {
        DaoError::IOError(e.to_string())
    }
}

impl From<JoinError> for DaoError {
    fn from(e: JoinError) -> Self {
        DaoError::InternalError(format!("Join Error: {}", e))
    }
}
