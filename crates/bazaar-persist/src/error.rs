use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Store read error: {0}")]
    StoreRead(String),

    #[error("Store write error: {0}")]
    StoreWrite(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    /// Whether the error was caused by caller input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PersistError::InvalidIdentifier(_))
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
