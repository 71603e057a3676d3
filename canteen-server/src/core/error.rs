use crate::orders::storage::StoreError;
use thiserror::Error;

/// Server bootstrap and runtime errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for server bootstrap paths
pub type Result<T> = std::result::Result<T, ServerError>;
