use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Inbound not found: {0}")]
    InboundNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, AccountingError>;
