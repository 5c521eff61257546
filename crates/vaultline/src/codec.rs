//! Sealed blob codec
//!
//! Blob layout: `[format tag][format payload]`.
//!
//! - tag 0, native: the opaque output of the platform protection
//!   primitive, invoked with the key as additional entropy
//! - tag 1, portable: `[16-byte IV][AES-256-CBC ciphertext, PKCS#7]`
//!
//! The writer picks the format from the platform capabilities, never from
//! the data. The reader dispatches on the tag.

use std::sync::Arc;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use crate::entropy::KeyMaterial;
use crate::error::{Result, StoreError};
use crate::protect::{Capabilities, Protector};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block and IV size
pub const IV_LEN: usize = 16;

const BLOCK_LEN: usize = 16;

/// On-disk format discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BlobFormat {
    Native = 0,
    Portable = 1,
}

impl BlobFormat {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(BlobFormat::Native),
            1 => Some(BlobFormat::Portable),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlobFormat::Native => "native",
            BlobFormat::Portable => "portable",
        }
    }
}

/// Seals and opens byte payloads with the entropy key
#[derive(Clone)]
pub struct BlobCodec {
    protector: Option<Arc<dyn Protector>>,
}

impl BlobCodec {
    pub fn new(protector: Option<Arc<dyn Protector>>) -> Self {
        Self { protector }
    }

    pub fn from_capabilities(caps: &Capabilities) -> Self {
        Self::new(caps.protector.clone())
    }

    /// Always writes the portable format
    pub fn portable() -> Self {
        Self::new(None)
    }

    /// Format used by [`BlobCodec::seal`]
    pub fn write_format(&self) -> BlobFormat {
        if self.protector.is_some() {
            BlobFormat::Native
        } else {
            BlobFormat::Portable
        }
    }

    pub fn seal(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
        match &self.protector {
            Some(protector) => {
                let protected = protector
                    .protect(plaintext, Some(key.as_bytes()))
                    .map_err(|e| StoreError::Seal(e.to_string()))?;
                let mut blob = Vec::with_capacity(1 + protected.len());
                blob.push(BlobFormat::Native.tag());
                blob.extend_from_slice(&protected);
                Ok(blob)
            }
            None => Ok(seal_portable(plaintext, key)),
        }
    }

    pub fn open(&self, blob: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
        let (&tag, payload) = blob.split_first().ok_or_else(|| {
            debug!("sealed blob is empty");
            StoreError::Decrypt
        })?;

        match BlobFormat::from_tag(tag) {
            Some(BlobFormat::Native) => {
                let Some(protector) = &self.protector else {
                    debug!("native blob but no protection primitive on this platform");
                    return Err(StoreError::Decrypt);
                };
                protector
                    .unprotect(payload, Some(key.as_bytes()))
                    .map_err(|e| {
                        debug!(error = %e, "native unprotect failed");
                        StoreError::Decrypt
                    })
            }
            Some(BlobFormat::Portable) => open_portable(payload, key),
            None => {
                debug!(tag, "unknown blob format tag");
                Err(StoreError::Decrypt)
            }
        }
    }
}

impl std::fmt::Debug for BlobCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobCodec")
            .field("format", &self.write_format())
            .finish()
    }
}

fn seal_portable(plaintext: &[u8], key: &KeyMaterial) -> Vec<u8> {
    // fresh IV per seal
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut blob = Vec::with_capacity(1 + IV_LEN + ciphertext.len());
    blob.push(BlobFormat::Portable.tag());
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    blob
}

fn open_portable(payload: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    if payload.len() < IV_LEN + BLOCK_LEN || (payload.len() - IV_LEN) % BLOCK_LEN != 0 {
        debug!(len = payload.len(), "portable blob truncated or misaligned");
        return Err(StoreError::Decrypt);
    }

    let (iv, ciphertext) = payload.split_at(IV_LEN);
    let iv: [u8; IV_LEN] = iv.try_into().map_err(|_| StoreError::Decrypt)?;

    Aes256CbcDec::new(key.as_bytes().into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| {
            debug!("portable blob padding check failed");
            StoreError::Decrypt
        })
}
