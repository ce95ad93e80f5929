use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientListError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Unknown tab: {0}")]
    InvalidTab(String),

    #[error("Unknown sort field: {0}")]
    InvalidField(String),
}

pub type Result<T> = std::result::Result<T, ClientListError>;
