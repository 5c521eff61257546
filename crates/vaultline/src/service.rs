//! Remote secret service seam
//!
//! Secrets themselves live in the remote vault named by the
//! [`ConfigRecord`](crate::config::ConfigRecord). This crate only defines
//! the operations it expects from a client and how their failures are
//! classified; the network adapter lives outside it.

use thiserror::Error;

/// Classified failure from the remote service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Name clash, e.g. a deleted secret that still awaits purge
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Timeouts, throttling, unavailable service
    #[error("Transient failure: {0}")]
    Transient(String),
}

impl ServiceError {
    /// Only transient failures are worth repeating
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Transient(_))
    }
}

/// Operations the tool needs from a remote secret store
pub trait SecretService {
    fn put_secret(&mut self, name: &str, value: &str) -> Result<(), ServiceError>;

    fn get_secret(&self, name: &str) -> Result<String, ServiceError>;

    /// Soft delete; the secret can be restored until purged
    fn delete_secret(&mut self, name: &str) -> Result<(), ServiceError>;

    /// Names of live secrets containing `filter` (all when `None`)
    fn list_secrets(&self, filter: Option<&str>) -> Result<Vec<String>, ServiceError>;

    fn restore_secret(&mut self, name: &str) -> Result<(), ServiceError>;

    /// Permanently remove a soft-deleted secret
    fn purge_secret(&mut self, name: &str) -> Result<(), ServiceError>;
}
