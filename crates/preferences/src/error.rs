use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("no usable data directory on this platform")]
    NoDataDir,
}
