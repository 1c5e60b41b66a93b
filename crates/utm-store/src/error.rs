//! Store errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("STORE/io: {0}")]
    Io(#[from] std::io::Error),

    #[error("STORE/serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}
