//! Configuration record and its plaintext payload encoding
//!
//! The payload sealed to disk is `[SHA-256 of body][body]` where the body is
//! the record as JSON. JSON escaping means field values may contain any
//! character; the digest makes garbage from a wrong key or a tampered blob
//! fail loudly instead of parsing into a different record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, StoreError};

const DIGEST_LEN: usize = 32;

/// How the remote secret service client authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Let the client library discover credentials
    #[default]
    Automatic,
    ManagedIdentity,
    ClientSecret,
    Certificate,
}

impl AuthMode {
    pub const ALL: [AuthMode; 4] = [
        AuthMode::Automatic,
        AuthMode::ManagedIdentity,
        AuthMode::ClientSecret,
        AuthMode::Certificate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Automatic => "automatic",
            AuthMode::ManagedIdentity => "managed-identity",
            AuthMode::ClientSecret => "client-secret",
            AuthMode::Certificate => "certificate",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        AuthMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| StoreError::InvalidConfig(format!("unknown auth mode: {}", s)))
    }
}

/// A sensitive string: redacted in `Debug`, zeroized on drop
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Local configuration: where the vault is and how to authenticate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigRecord {
    pub vault_url: String,
    #[serde(default)]
    pub auth_mode: AuthMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<SecretString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_password: Option<SecretString>,
}

/// Typed view of the credential fields for the remote client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential<'a> {
    Automatic,
    ManagedIdentity {
        /// User-assigned identity; system-assigned when absent
        client_id: Option<&'a str>,
    },
    ClientSecret {
        tenant_id: &'a str,
        client_id: &'a str,
        client_secret: &'a str,
    },
    Certificate {
        tenant_id: &'a str,
        client_id: &'a str,
        certificate_path: &'a str,
        certificate_password: Option<&'a str>,
    },
}

impl ConfigRecord {
    pub fn new(vault_url: impl Into<String>, auth_mode: AuthMode) -> Self {
        Self {
            vault_url: vault_url.into(),
            auth_mode,
            ..Default::default()
        }
    }

    /// Check the URL and the fields the auth mode needs
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(self.vault_url.trim())
            .map_err(|e| StoreError::InvalidConfig(format!("vault URL: {}", e)))?;
        if url.scheme() != "https" {
            return Err(StoreError::InvalidConfig(format!(
                "vault URL must use https, got {}",
                url.scheme()
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(StoreError::InvalidConfig(
                "vault URL has no host".to_string(),
            ));
        }

        self.credential().map(|_| ())
    }

    /// Credential fields for the configured mode; fails if a required
    /// field is missing or blank
    pub fn credential(&self) -> Result<Credential<'_>> {
        let mode = self.auth_mode;
        let credential = match mode {
            AuthMode::Automatic => Credential::Automatic,
            AuthMode::ManagedIdentity => Credential::ManagedIdentity {
                client_id: present(self.client_id.as_deref()),
            },
            AuthMode::ClientSecret => Credential::ClientSecret {
                tenant_id: required(self.tenant_id.as_deref(), mode, "tenant id")?,
                client_id: required(self.client_id.as_deref(), mode, "client id")?,
                client_secret: required(secret_str(&self.client_secret), mode, "client secret")?,
            },
            AuthMode::Certificate => Credential::Certificate {
                tenant_id: required(self.tenant_id.as_deref(), mode, "tenant id")?,
                client_id: required(self.client_id.as_deref(), mode, "client id")?,
                certificate_path: required(self.certificate_path.as_deref(), mode, "certificate path")?,
                certificate_password: present(secret_str(&self.certificate_password)),
            },
        };
        Ok(credential)
    }

    /// Plaintext payload to seal
    pub fn encode(&self) -> Result<Zeroizing<Vec<u8>>> {
        let body = Zeroizing::new(
            serde_json::to_vec(self)
                .map_err(|e| StoreError::InvalidConfig(format!("serialize: {}", e)))?,
        );
        let digest = Sha256::digest(body.as_slice());

        let mut payload = Zeroizing::new(Vec::with_capacity(DIGEST_LEN + body.len()));
        payload.extend_from_slice(&digest);
        payload.extend_from_slice(&body);
        Ok(payload)
    }

    /// Parse an opened payload. Any mismatch is a [`StoreError::Parse`];
    /// there is no partial result.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < DIGEST_LEN {
            return Err(StoreError::Parse(format!(
                "payload is {} bytes, shorter than its digest",
                payload.len()
            )));
        }
        let (digest, body) = payload.split_at(DIGEST_LEN);
        if Sha256::digest(body).as_slice() != digest {
            return Err(StoreError::Parse("integrity check failed".to_string()));
        }

        let record: ConfigRecord =
            serde_json::from_slice(body).map_err(|e| StoreError::Parse(e.to_string()))?;
        record
            .validate()
            .map_err(|e| StoreError::Parse(format!("stored record is invalid: {}", e)))?;
        Ok(record)
    }
}

fn secret_str(field: &Option<SecretString>) -> Option<&str> {
    field.as_ref().map(SecretString::expose)
}

fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(field: Option<&'a str>, mode: AuthMode, name: &str) -> Result<&'a str> {
    present(field).ok_or_else(|| {
        StoreError::InvalidConfig(format!("{} auth requires a {}", mode, name))
    })
}
