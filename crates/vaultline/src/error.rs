//! Error taxonomy for key handling and sealed config storage

use thiserror::Error;

/// Errors surfaced by the key store, the codec and config persistence
#[derive(Error, Debug)]
pub enum StoreError {
    /// Every rung of the key ladder failed and ephemeral keys are not allowed
    #[error("No encryption key could be loaded or persisted")]
    KeyUnavailable,

    /// Wrong or rotated key, or a corrupted blob
    #[error("Sealed configuration could not be decrypted (wrong key or corrupted data)")]
    Decrypt,

    /// Decrypted bytes do not match the expected layout
    #[error("Sealed configuration is malformed: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The platform protection primitive refused to seal
    #[error("Sealing failed: {0}")]
    Seal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True for failures that mean the stored config cannot be read back
    /// with the current key and needs a retry or reset decision
    pub fn is_unreadable(&self) -> bool {
        matches!(self, StoreError::Decrypt | StoreError::Parse(_))
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
