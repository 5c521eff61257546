//! Composed flows over the key store and the config file

use tracing::{info, warn};
use vaultline_core::Paths;

use crate::codec::BlobCodec;
use crate::config::ConfigRecord;
use crate::entropy::{EntropyStore, EphemeralPolicy, KeyMaterial};
use crate::error::{Result, StoreError};
use crate::persistence::ConfigStore;
use crate::protect::Capabilities;

/// What to do when the stored config cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Re-resolve the key and load again (after restoring the key or file)
    Retry,
    /// Forget the config and the key, start over
    Reset,
    /// Give up and return the error
    Abort,
}

/// The key store and the config file it seals
pub struct Session {
    entropy: EntropyStore,
    store: ConfigStore,
}

impl Session {
    pub fn new(entropy: EntropyStore, store: ConfigStore) -> Self {
        Self { entropy, store }
    }

    /// Wire up the platform ladder, codec and file locations
    pub fn open(paths: &Paths, caps: &Capabilities, policy: EphemeralPolicy) -> Self {
        let entropy = EntropyStore::for_platform(paths, caps, policy);
        let store = ConfigStore::new(paths.config_file(), BlobCodec::from_capabilities(caps));
        Self::new(entropy, store)
    }

    pub fn entropy(&self) -> &EntropyStore {
        &self.entropy
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn load(&self) -> Result<Option<ConfigRecord>> {
        self.store.load(&self.entropy)
    }

    pub fn save(&self, record: &ConfigRecord) -> Result<()> {
        self.store.save(record, &self.entropy)
    }

    /// Load, asking `choose` what to do whenever the stored config cannot
    /// be decrypted or parsed. Other errors are returned directly.
    pub fn load_with_recovery<F>(&mut self, mut choose: F) -> Result<Option<ConfigRecord>>
    where
        F: FnMut(&StoreError) -> Recovery,
    {
        loop {
            match self.load() {
                Err(e) if e.is_unreadable() => {
                    warn!(error = %e, "stored configuration is unreadable");
                    match choose(&e) {
                        Recovery::Retry => self.entropy.clear_cache(),
                        Recovery::Reset => {
                            self.forget_everything()?;
                            return Ok(None);
                        }
                        Recovery::Abort => return Err(e),
                    }
                }
                other => return other,
            }
        }
    }

    /// Delete the config file and the persisted key. Everything sealed with
    /// the old key becomes unreadable.
    pub fn forget_everything(&mut self) -> Result<()> {
        self.store.delete()?;
        self.entropy.purge()?;
        info!("forgot configuration and key");
        Ok(())
    }

    /// Replace the key and re-seal the config with it. Returns whether a
    /// config was re-sealed.
    ///
    /// Nothing changes if the current config cannot be read. The new key is
    /// persisted before the old one is cleared, and if re-sealing fails the
    /// old key is put back so the config on disk stays readable.
    pub fn rekey(&mut self) -> Result<bool> {
        let Some(record) = self.load()? else {
            self.entropy.replace_key(KeyMaterial::generate())?;
            return Ok(false);
        };
        let old = self.entropy.get_or_create_key()?.clone();

        let result = self
            .entropy
            .replace_key(KeyMaterial::generate())
            .and_then(|_| self.save(&record));
        if let Err(e) = result {
            warn!(error = %e, "rekey failed, restoring the previous key");
            if let Err(restore) = self.entropy.replace_key(old) {
                warn!(error = %restore, "could not restore the previous key");
            }
            return Err(e);
        }

        info!("re-sealed configuration with a new key");
        Ok(true)
    }
}
