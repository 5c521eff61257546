//! Sealed configuration file
//!
//! A single file holds the sealed [`ConfigRecord`]. A missing file means
//! first run. A file that cannot be opened or parsed is always an error;
//! it is never reported as "no configuration".

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::codec::{BlobCodec, BlobFormat};
use crate::config::ConfigRecord;
use crate::entropy::EntropyStore;
use crate::error::Result;
use crate::files;

/// What is on disk, read without decrypting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobInfo {
    /// `None` when the tag byte is unknown or the file is empty
    pub format: Option<BlobFormat>,
    pub size: u64,
}

/// Reads and writes the sealed configuration file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    codec: BlobCodec,
}

impl ConfigStore {
    pub fn new(path: impl AsRef<Path>, codec: BlobCodec) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            codec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Validate, seal and atomically replace the config file
    pub fn save(&self, record: &ConfigRecord, entropy: &EntropyStore) -> Result<()> {
        record.validate()?;
        let key = entropy.get_or_create_key()?;

        let payload = record.encode()?;
        let blob = self.codec.seal(&payload, key)?;
        files::write_private(&self.path, &blob)?;

        info!(
            path = %self.path.display(),
            format = self.codec.write_format().as_str(),
            "saved sealed configuration"
        );
        Ok(())
    }

    /// Load the config. `Ok(None)` only when the file does not exist.
    pub fn load(&self, entropy: &EntropyStore) -> Result<Option<ConfigRecord>> {
        let Some(blob) = files::read_if_exists(&self.path)? else {
            debug!(path = %self.path.display(), "no configuration file");
            return Ok(None);
        };

        let key = entropy.get_or_create_key()?;
        let payload = Zeroizing::new(self.codec.open(&blob, key)?);
        let record = ConfigRecord::decode(&payload)?;

        debug!(path = %self.path.display(), "loaded sealed configuration");
        Ok(Some(record))
    }

    /// Remove the config file; a missing file is not an error
    pub fn delete(&self) -> Result<()> {
        if files::remove_if_exists(&self.path)? {
            info!(path = %self.path.display(), "deleted configuration");
        }
        Ok(())
    }

    /// Format tag and size of the stored blob, if any
    pub fn inspect(&self) -> Result<Option<BlobInfo>> {
        Ok(files::read_if_exists(&self.path)?.map(|blob| BlobInfo {
            format: blob.first().copied().and_then(BlobFormat::from_tag),
            size: blob.len() as u64,
        }))
    }
}
