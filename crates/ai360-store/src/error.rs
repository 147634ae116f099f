//! Store error types.

use std::path::PathBuf;

use ai360_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),

    /// No platform data directory and none configured.
    #[error("no data directory available; set general.data_dir")]
    NoDataDir,

    #[error(transparent)]
    Core(#[from] CoreError),
}
