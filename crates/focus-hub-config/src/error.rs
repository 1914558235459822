use std::path::PathBuf;
use thiserror::Error;

/// Failures of the local stores
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("token encryption failed")]
    Encrypt,

    #[error("stored token could not be decrypted")]
    Decrypt,
}
