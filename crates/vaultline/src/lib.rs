//! vaultline - Remote vault configuration, sealed at rest
//!
//! "Know where the secrets live without leaving the directions lying around."
//!
//! The tool remembers which remote secret vault to talk to and how to
//! authenticate against it. That record holds credentials, so it is sealed
//! with a per-user key before it touches disk. The key itself lives in the
//! best place the platform offers: the keychain, a DPAPI-wrapped file, or
//! an owner-only file as the last resort.
//!
//! Layers, bottom up:
//! - [`entropy`]: resolve and cache the per-user key
//! - [`codec`]: seal and open blobs (native protection or AES-256-CBC)
//! - [`config`]: the record and its integrity-checked payload
//! - [`persistence`]: the sealed config file
//! - [`session`]: recovery, reset and rekey flows
//! - [`input`]: masked terminal input for secrets
//! - [`service`]: the operations expected from a remote vault client

pub mod codec;
pub mod config;
pub mod entropy;
pub mod error;
mod files;
pub mod input;
pub mod persistence;
pub mod protect;
pub mod service;
pub mod session;

pub use codec::{BlobCodec, BlobFormat};
pub use config::{AuthMode, ConfigRecord, Credential, SecretString};
pub use entropy::{EntropyStore, EphemeralPolicy, KeyMaterial, KeySource};
pub use error::{Result, StoreError};
pub use persistence::{BlobInfo, ConfigStore};
pub use protect::{Capabilities, Protector};
pub use service::{SecretService, ServiceError};
pub use session::{Recovery, Session};
