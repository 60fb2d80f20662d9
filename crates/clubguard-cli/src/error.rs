use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] clubguard_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to read record {path}: {source}")]
    ReadRecord { path: PathBuf, source: io::Error },
    #[error("Record file {0} must contain a JSON object")]
    NotARecord(PathBuf),
}
