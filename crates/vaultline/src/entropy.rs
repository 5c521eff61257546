//! Entropy store - the per-user key that seals local configuration
//!
//! A 32-byte key is resolved once per run by walking a ladder of
//! [`KeyBackend`]s in order:
//!
//! 1. the platform credential store (keychain), when the platform has one
//! 2. a file wrapped by the platform protection primitive (DPAPI)
//! 3. a plain file holding the raw key bytes
//!
//! Each rung first tries to read an existing key; if none exists it
//! generates one and tries to persist it. Any failure is logged and the
//! next rung is tried. When every rung fails the store either hands out an
//! ephemeral key for this process or reports [`StoreError::KeyUnavailable`],
//! depending on its [`EphemeralPolicy`].
//!
//! The plain file is protected by file permissions alone (mode 600 on
//! Unix). Anyone able to read it can open the sealed configuration.
//!
//! Known race: two processes resolving the key for the first time at the
//! same moment can each generate a key and overwrite the other's. Blobs
//! sealed with the losing key become unreadable and nothing detects it.
//! There is no cross-process locking.

use std::cell::OnceCell;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, info, warn};
use vaultline_core::Paths;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, StoreError};
use crate::files;
use crate::protect::{Capabilities, Protector};

/// Key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Keychain service name
pub const KEYCHAIN_SERVICE: &str = "vaultline";

/// Keychain account holding the key
pub const KEYCHAIN_ACCOUNT: &str = "entropy";

/// Symmetric key material. Zeroized on drop, never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial([u8; KEY_LEN]);

impl KeyMaterial {
    /// Fresh key from the OS CSPRNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice; fails unless it is exactly [`KEY_LEN`] bytes
    pub fn from_slice(bytes: &[u8]) -> io::Result<Self> {
        let array: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("stored key is {} bytes, expected {}", bytes.len(), KEY_LEN),
            )
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}

/// Where the active key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Keychain,
    ProtectedFile,
    PlainFile,
    /// Process-lifetime only; anything sealed with it is lost on exit
    Ephemeral,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Keychain => "keychain",
            KeySource::ProtectedFile => "protected-file",
            KeySource::PlainFile => "plain-file",
            KeySource::Ephemeral => "ephemeral",
        }
    }

    /// Whether keys from this source survive a restart
    pub fn is_persistent(&self) -> bool {
        !matches!(self, KeySource::Ephemeral)
    }
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rung of the key ladder
pub trait KeyBackend {
    fn source(&self) -> KeySource;

    /// Read the stored key; `Ok(None)` when nothing is stored yet
    fn load(&self) -> io::Result<Option<KeyMaterial>>;

    fn store(&self, key: &KeyMaterial) -> io::Result<()>;

    /// Delete the stored key; deleting a missing key succeeds
    fn purge(&self) -> io::Result<()>;
}

/// Platform credential store via `keyring`. The key is kept base64 encoded.
pub struct KeychainBackend {
    service: String,
    account: String,
}

impl KeychainBackend {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    fn entry(&self) -> io::Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.account).map_err(io::Error::other)
    }
}

impl KeyBackend for KeychainBackend {
    fn source(&self) -> KeySource {
        KeySource::Keychain
    }

    fn load(&self) -> io::Result<Option<KeyMaterial>> {
        let encoded = match self.entry()?.get_password() {
            Ok(value) => Zeroizing::new(value),
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(e) => return Err(io::Error::other(e)),
        };
        let bytes = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        );
        KeyMaterial::from_slice(&bytes).map(Some)
    }

    fn store(&self, key: &KeyMaterial) -> io::Result<()> {
        let encoded = Zeroizing::new(STANDARD.encode(key.as_bytes()));
        self.entry()?
            .set_password(&encoded)
            .map_err(io::Error::other)
    }

    fn purge(&self) -> io::Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

/// Key file wrapped by the platform protection primitive (no extra entropy)
pub struct ProtectedFileBackend {
    path: PathBuf,
    protector: Arc<dyn Protector>,
}

impl ProtectedFileBackend {
    pub fn new(path: impl AsRef<Path>, protector: Arc<dyn Protector>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            protector,
        }
    }
}

impl KeyBackend for ProtectedFileBackend {
    fn source(&self) -> KeySource {
        KeySource::ProtectedFile
    }

    fn load(&self) -> io::Result<Option<KeyMaterial>> {
        let Some(wrapped) = files::read_if_exists(&self.path)? else {
            return Ok(None);
        };
        let bytes = Zeroizing::new(self.protector.unprotect(&wrapped, None)?);
        KeyMaterial::from_slice(&bytes).map(Some)
    }

    fn store(&self, key: &KeyMaterial) -> io::Result<()> {
        let wrapped = self.protector.protect(key.as_bytes(), None)?;
        files::write_private(&self.path, &wrapped)
    }

    fn purge(&self) -> io::Result<()> {
        files::remove_if_exists(&self.path).map(|_| ())
    }
}

/// Raw key bytes in an owner-only file
pub struct PlainFileBackend {
    path: PathBuf,
}

impl PlainFileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl KeyBackend for PlainFileBackend {
    fn source(&self) -> KeySource {
        KeySource::PlainFile
    }

    fn load(&self) -> io::Result<Option<KeyMaterial>> {
        match files::read_if_exists(&self.path)? {
            Some(bytes) => {
                let bytes = Zeroizing::new(bytes);
                KeyMaterial::from_slice(&bytes).map(Some)
            }
            None => Ok(None),
        }
    }

    fn store(&self, key: &KeyMaterial) -> io::Result<()> {
        files::write_private(&self.path, key.as_bytes())
    }

    fn purge(&self) -> io::Result<()> {
        files::remove_if_exists(&self.path).map(|_| ())
    }
}

/// What to do when no rung of the ladder can provide a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EphemeralPolicy {
    /// Warn and use a key that lives only as long as the process
    Allow,
    /// Report [`StoreError::KeyUnavailable`]; see [`EntropyStore::accept_ephemeral`]
    Deny,
}

struct ResolvedKey {
    material: KeyMaterial,
    source: KeySource,
}

/// Resolves and caches the key for this process.
///
/// Not `Sync`; the tool is single threaded.
pub struct EntropyStore {
    ladder: Vec<Box<dyn KeyBackend>>,
    policy: EphemeralPolicy,
    cache: OnceCell<ResolvedKey>,
}

impl EntropyStore {
    pub fn new(ladder: Vec<Box<dyn KeyBackend>>, policy: EphemeralPolicy) -> Self {
        Self {
            ladder,
            policy,
            cache: OnceCell::new(),
        }
    }

    /// Build the ladder the platform supports
    pub fn for_platform(paths: &Paths, caps: &Capabilities, policy: EphemeralPolicy) -> Self {
        let mut ladder: Vec<Box<dyn KeyBackend>> = Vec::new();
        if caps.keychain {
            ladder.push(Box::new(KeychainBackend::new(
                KEYCHAIN_SERVICE,
                KEYCHAIN_ACCOUNT,
            )));
        }
        if let Some(protector) = &caps.protector {
            ladder.push(Box::new(ProtectedFileBackend::new(
                paths.protected_key_file(),
                Arc::clone(protector),
            )));
        }
        ladder.push(Box::new(PlainFileBackend::new(paths.plain_key_file())));
        Self::new(ladder, policy)
    }

    /// Return the key for this process, resolving it on first use
    pub fn get_or_create_key(&self) -> Result<&KeyMaterial> {
        if let Some(resolved) = self.cache.get() {
            return Ok(&resolved.material);
        }

        match self.resolve() {
            Some(resolved) => Ok(&self.cache.get_or_init(|| resolved).material),
            None => match self.policy {
                EphemeralPolicy::Allow => Ok(self.accept_ephemeral()),
                EphemeralPolicy::Deny => Err(StoreError::KeyUnavailable),
            },
        }
    }

    /// Use a process-lifetime key. Returns the cached key instead if one
    /// was already resolved.
    pub fn accept_ephemeral(&self) -> &KeyMaterial {
        &self
            .cache
            .get_or_init(|| {
                warn!(
                    "no key backend could persist a key; using an ephemeral key, \
                     configuration saved in this run cannot be read after exit"
                );
                ResolvedKey {
                    material: KeyMaterial::generate(),
                    source: KeySource::Ephemeral,
                }
            })
            .material
    }

    /// Source of the cached key, if resolved
    pub fn source(&self) -> Option<KeySource> {
        self.cache.get().map(|resolved| resolved.source)
    }

    /// Drop the cached key so the next call walks the ladder again
    pub fn clear_cache(&mut self) {
        self.cache.take();
    }

    /// Delete the persisted key from every rung and drop the cached key.
    /// Every rung is attempted; the first failure is returned.
    pub fn purge(&mut self) -> Result<()> {
        self.clear_cache();

        let mut first_error = None;
        for backend in &self.ladder {
            let source = backend.source();
            match backend.purge() {
                Ok(()) => debug!(%source, "purged key"),
                Err(e) => {
                    warn!(%source, error = %e, "failed to purge key");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(StoreError::Io(e)),
            None => Ok(()),
        }
    }

    /// Persist `key` in the first rung that accepts it, then clear the other
    /// rungs and make it the cached key.
    ///
    /// Nothing is deleted until the new key is stored. A higher rung that
    /// still holds a key would shadow the new one, so failing to clear it is
    /// an error; leftovers in lower rungs are only logged. On error the
    /// cached key is left as it was.
    pub fn replace_key(&mut self, key: KeyMaterial) -> Result<KeySource> {
        let mut stored_at = None;
        for (index, backend) in self.ladder.iter().enumerate() {
            match backend.store(&key) {
                Ok(()) => {
                    stored_at = Some(index);
                    break;
                }
                Err(e) => {
                    warn!(source = %backend.source(), error = %e, "could not store replacement key, trying next backend")
                }
            }
        }
        let Some(stored_at) = stored_at else {
            return Err(StoreError::KeyUnavailable);
        };

        for (index, backend) in self.ladder.iter().enumerate() {
            let source = backend.source();
            if index < stored_at {
                if matches!(backend.load(), Ok(Some(_))) {
                    backend.purge().map_err(|e| {
                        warn!(%source, error = %e, "could not clear a key that shadows the replacement");
                        StoreError::Io(e)
                    })?;
                }
            } else if index > stored_at {
                if let Err(e) = backend.purge() {
                    warn!(%source, error = %e, "could not clear old key");
                }
            }
        }

        let source = self.ladder[stored_at].source();
        self.cache = OnceCell::from(ResolvedKey {
            material: key,
            source,
        });
        info!(%source, "stored replacement key");
        Ok(source)
    }

    /// Source of the key a fresh process would load, without generating or
    /// storing anything. `None` when no rung holds a key.
    pub fn find_persisted(&self) -> Option<KeySource> {
        if let Some(resolved) = self.cache.get() {
            return Some(resolved.source);
        }
        self.ladder.iter().find_map(|backend| match backend.load() {
            Ok(Some(_)) => Some(backend.source()),
            Ok(None) => None,
            Err(e) => {
                debug!(source = %backend.source(), error = %e, "could not read key");
                None
            }
        })
    }

    fn resolve(&self) -> Option<ResolvedKey> {
        for backend in &self.ladder {
            let source = backend.source();
            match backend.load() {
                Ok(Some(material)) => {
                    debug!(%source, "loaded key");
                    return Some(ResolvedKey { material, source });
                }
                Ok(None) => {
                    let material = KeyMaterial::generate();
                    match backend.store(&material) {
                        Ok(()) => {
                            info!(%source, "generated and stored a new key");
                            return Some(ResolvedKey { material, source });
                        }
                        Err(e) => {
                            warn!(%source, error = %e, "could not store new key, trying next backend")
                        }
                    }
                }
                Err(e) => warn!(%source, error = %e, "could not read key, trying next backend"),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect::testing::FakeProtector;
    use std::fs;
    use tempfile::TempDir;

    /// A rung whose platform facility is missing
    struct UnavailableBackend(KeySource);

    impl KeyBackend for UnavailableBackend {
        fn source(&self) -> KeySource {
            self.0
        }

        fn load(&self) -> io::Result<Option<KeyMaterial>> {
            Err(io::Error::other("no credential store"))
        }

        fn store(&self, _key: &KeyMaterial) -> io::Result<()> {
            Err(io::Error::other("no credential store"))
        }

        fn purge(&self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A protector that can read but refuses to write
    struct RefusingProtector;

    impl Protector for RefusingProtector {
        fn name(&self) -> &'static str {
            "refusing"
        }

        fn protect(&self, _data: &[u8], _entropy: Option<&[u8]>) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "protect refused"))
        }

        fn unprotect(&self, data: &[u8], _entropy: Option<&[u8]>) -> io::Result<Vec<u8>> {
            Ok(data.to_vec())
        }
    }

    fn plain_store(dir: &Path, policy: EphemeralPolicy) -> EntropyStore {
        EntropyStore::new(
            vec![Box::new(PlainFileBackend::new(dir.join("entropy.key")))],
            policy,
        )
    }

    #[test]
    fn test_key_material_debug_is_redacted() {
        let key = KeyMaterial::from_bytes([0xAB; KEY_LEN]);
        let debug = format!("{:?}", key);
        assert!(!debug.contains("171"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert!(KeyMaterial::from_slice(&[1u8; 16]).is_err());
        assert!(KeyMaterial::from_slice(&[1u8; 33]).is_err());
        assert!(KeyMaterial::from_slice(&[1u8; KEY_LEN]).is_ok());
    }

    #[test]
    fn test_plain_file_persists_across_stores() {
        let temp = TempDir::new().unwrap();

        let first = plain_store(temp.path(), EphemeralPolicy::Deny);
        let key = first.get_or_create_key().unwrap().clone();
        assert_eq!(first.source(), Some(KeySource::PlainFile));
        assert_eq!(fs::read(temp.path().join("entropy.key")).unwrap(), key.as_bytes());

        let second = plain_store(temp.path(), EphemeralPolicy::Deny);
        assert_eq!(second.get_or_create_key().unwrap(), &key);
    }

    #[cfg(unix)]
    #[test]
    fn test_plain_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = plain_store(temp.path(), EphemeralPolicy::Deny);
        store.get_or_create_key().unwrap();

        let mode = fs::metadata(temp.path().join("entropy.key"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_key_is_cached() {
        let temp = TempDir::new().unwrap();
        let store = plain_store(temp.path(), EphemeralPolicy::Deny);
        let key = store.get_or_create_key().unwrap().clone();

        // later calls never touch the backend again
        fs::remove_file(temp.path().join("entropy.key")).unwrap();
        assert_eq!(store.get_or_create_key().unwrap(), &key);
        assert!(!temp.path().join("entropy.key").exists());
    }

    #[test]
    fn test_protected_file_wraps_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entropy.protected");
        let store = EntropyStore::new(
            vec![Box::new(ProtectedFileBackend::new(&path, Arc::new(FakeProtector)))],
            EphemeralPolicy::Deny,
        );

        let key = store.get_or_create_key().unwrap().clone();
        assert_eq!(store.source(), Some(KeySource::ProtectedFile));

        let on_disk = fs::read(&path).unwrap();
        assert_ne!(on_disk.as_slice(), key.as_bytes().as_slice());

        let backend = ProtectedFileBackend::new(&path, Arc::new(FakeProtector));
        assert_eq!(backend.load().unwrap(), Some(key));
    }

    #[test]
    fn test_falls_through_to_plain_file() {
        let temp = TempDir::new().unwrap();
        let store = EntropyStore::new(
            vec![
                Box::new(UnavailableBackend(KeySource::Keychain)),
                Box::new(ProtectedFileBackend::new(
                    temp.path().join("entropy.protected"),
                    Arc::new(RefusingProtector),
                )),
                Box::new(PlainFileBackend::new(temp.path().join("entropy.key"))),
            ],
            EphemeralPolicy::Deny,
        );

        let key = store.get_or_create_key().unwrap().clone();
        assert_eq!(store.source(), Some(KeySource::PlainFile));
        assert!(!temp.path().join("entropy.protected").exists());
        assert_eq!(
            fs::read(temp.path().join("entropy.key")).unwrap(),
            key.as_bytes()
        );
    }

    #[test]
    fn test_exhausted_ladder_denied() {
        let store = EntropyStore::new(
            vec![Box::new(UnavailableBackend(KeySource::Keychain))],
            EphemeralPolicy::Deny,
        );

        assert!(matches!(
            store.get_or_create_key(),
            Err(StoreError::KeyUnavailable)
        ));
        assert_eq!(store.source(), None);

        let key = store.accept_ephemeral().clone();
        assert_eq!(store.source(), Some(KeySource::Ephemeral));
        assert_eq!(store.get_or_create_key().unwrap(), &key);
    }

    #[test]
    fn test_exhausted_ladder_allowed() {
        let store = EntropyStore::new(
            vec![Box::new(UnavailableBackend(KeySource::Keychain))],
            EphemeralPolicy::Allow,
        );

        assert!(store.get_or_create_key().is_ok());
        assert_eq!(store.source(), Some(KeySource::Ephemeral));
        assert!(!KeySource::Ephemeral.is_persistent());
    }

    #[test]
    fn test_corrupt_key_file_is_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entropy.key");
        fs::write(&path, b"too short").unwrap();

        let store = plain_store(temp.path(), EphemeralPolicy::Deny);
        assert!(matches!(
            store.get_or_create_key(),
            Err(StoreError::KeyUnavailable)
        ));
        assert_eq!(fs::read(&path).unwrap(), b"too short");
    }

    #[test]
    fn test_purge_is_idempotent_and_rotates() {
        let temp = TempDir::new().unwrap();
        let mut store = plain_store(temp.path(), EphemeralPolicy::Deny);
        let old = store.get_or_create_key().unwrap().clone();

        store.purge().unwrap();
        assert!(!temp.path().join("entropy.key").exists());
        assert_eq!(store.source(), None);
        store.purge().unwrap();

        let new = store.get_or_create_key().unwrap().clone();
        assert_ne!(old, new);
    }

    #[test]
    fn test_replace_key_overwrites_in_place() {
        let temp = TempDir::new().unwrap();
        let mut store = plain_store(temp.path(), EphemeralPolicy::Deny);
        let old = store.get_or_create_key().unwrap().clone();

        let new = KeyMaterial::generate();
        assert_eq!(store.replace_key(new.clone()).unwrap(), KeySource::PlainFile);
        assert_ne!(old, new);
        assert_eq!(store.get_or_create_key().unwrap(), &new);
        assert_eq!(fs::read(temp.path().join("entropy.key")).unwrap(), new.as_bytes());
    }

    #[test]
    fn test_replace_key_keeps_old_when_nothing_stores() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entropy.protected");
        let old = KeyMaterial::from_bytes([4; KEY_LEN]);
        fs::write(&path, old.as_bytes()).unwrap();

        // RefusingProtector reads the existing key but cannot write
        let mut store = EntropyStore::new(
            vec![Box::new(ProtectedFileBackend::new(&path, Arc::new(RefusingProtector)))],
            EphemeralPolicy::Deny,
        );
        assert_eq!(store.get_or_create_key().unwrap(), &old);

        assert!(matches!(
            store.replace_key(KeyMaterial::generate()),
            Err(StoreError::KeyUnavailable)
        ));
        assert_eq!(fs::read(&path).unwrap(), old.as_bytes());
        assert_eq!(store.get_or_create_key().unwrap(), &old);
    }

    #[test]
    fn test_replace_key_clears_lower_rungs() {
        let temp = TempDir::new().unwrap();
        let protected = temp.path().join("entropy.protected");
        let plain = temp.path().join("entropy.key");
        fs::write(&plain, [9u8; KEY_LEN]).unwrap();

        let mut store = EntropyStore::new(
            vec![
                Box::new(ProtectedFileBackend::new(&protected, Arc::new(FakeProtector))),
                Box::new(PlainFileBackend::new(&plain)),
            ],
            EphemeralPolicy::Deny,
        );
        assert_eq!(
            store.replace_key(KeyMaterial::generate()).unwrap(),
            KeySource::ProtectedFile
        );
        assert!(protected.exists());
        assert!(!plain.exists());
    }

    #[test]
    fn test_find_persisted_never_creates_a_key() {
        let temp = TempDir::new().unwrap();
        let store = plain_store(temp.path(), EphemeralPolicy::Deny);

        assert_eq!(store.find_persisted(), None);
        assert!(!temp.path().join("entropy.key").exists());
        assert_eq!(store.source(), None);

        plain_store(temp.path(), EphemeralPolicy::Deny)
            .get_or_create_key()
            .unwrap();
        assert_eq!(store.find_persisted(), Some(KeySource::PlainFile));
    }

    #[test]
    fn test_platform_ladder_shape() {
        let temp = TempDir::new().unwrap();
        let paths = Paths::from_dir(temp.path());
        let caps = Capabilities {
            keychain: false,
            protector: Some(Arc::new(FakeProtector)),
        };

        let store = EntropyStore::for_platform(&paths, &caps, EphemeralPolicy::Deny);
        store.get_or_create_key().unwrap();
        assert_eq!(store.source(), Some(KeySource::ProtectedFile));
        assert!(paths.protected_key_file().exists());
        assert!(!paths.plain_key_file().exists());

        let portable = EntropyStore::for_platform(&paths, &Capabilities::portable(), EphemeralPolicy::Deny);
        portable.get_or_create_key().unwrap();
        assert_eq!(portable.source(), Some(KeySource::PlainFile));
    }
}
