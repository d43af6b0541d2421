//! Error types for the core library

use thiserror::Error;

use crate::session::SessionState;

#[derive(Error, Debug)]
pub enum Error {
    /// The backing database could not be opened, read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Operation not allowed while session is {state}")]
    InvalidState { state: SessionState },
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl Error {
    /// Whether this error came from the storage medium
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
