use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    FileReadFailed,
    FileWriteFailed,
    DecodeFailed,
    EncodeFailed,
    NoDataDir,
}

/// The only error family in this crate: the store either fully succeeds
/// or the caller treats the operation as if nothing happened.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Load Error: {message} (path: {path:?})")]
    Load { code: ErrorCode, message: String, path: PathBuf },

    #[error("Save Error: {message} (path: {path:?})")]
    Save { code: ErrorCode, message: String, path: PathBuf },

    #[error("Storage Error: {message}")]
    DataDir { code: ErrorCode, message: String },
}
