//! Standard per-user paths used by vaultline

use std::path::{Path, PathBuf};

/// File name of the sealed configuration blob
pub const CONFIG_FILE: &str = "vaultline.cfg";

/// File name of the raw key (portable persistence)
pub const PLAIN_KEY_FILE: &str = "entropy.key";

/// File name of the platform-protected key
pub const PROTECTED_KEY_FILE: &str = "entropy.protected";

/// Standard vaultline paths
#[derive(Debug, Clone)]
pub struct Paths {
    /// Directory holding the sealed config and key files (~/.config/vaultline)
    pub dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("vaultline");

        Self { dir }
    }

    /// Use an explicit directory instead of the per-user default
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Sealed configuration blob
    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Raw key bytes, owner-only permissions
    pub fn plain_key_file(&self) -> PathBuf {
        self.dir.join(PLAIN_KEY_FILE)
    }

    /// Key bytes wrapped by the platform protection primitive
    pub fn protected_key_file(&self) -> PathBuf {
        self.dir.join(PROTECTED_KEY_FILE)
    }
}
