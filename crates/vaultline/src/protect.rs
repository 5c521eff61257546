//! Platform protection capability
//!
//! Some platforms offer a per-user encrypt/decrypt primitive that needs no
//! key management from the application (DPAPI on Windows). The rest of the
//! crate only sees the [`Protector`] trait; which implementation exists is
//! decided once by [`Capabilities::probe`].

use std::io;
use std::sync::Arc;

/// A per-user data protection primitive
pub trait Protector {
    /// Short name for log lines
    fn name(&self) -> &'static str;

    /// Protect `data`, optionally binding it to extra `entropy`
    fn protect(&self, data: &[u8], entropy: Option<&[u8]>) -> io::Result<Vec<u8>>;

    /// Reverse [`Protector::protect`]; the same `entropy` must be supplied
    fn unprotect(&self, data: &[u8], entropy: Option<&[u8]>) -> io::Result<Vec<u8>>;
}

/// What the current platform can do for key and blob protection
#[derive(Clone)]
pub struct Capabilities {
    /// A native credential store (keychain) is the preferred key home
    pub keychain: bool,
    /// Per-user protection primitive, if any
    pub protector: Option<Arc<dyn Protector>>,
}

impl Capabilities {
    /// Detect the capabilities of the running platform
    pub fn probe() -> Self {
        let caps = Self {
            keychain: cfg!(target_os = "macos"),
            protector: native_protector(),
        };
        tracing::debug!(
            keychain = caps.keychain,
            protector = caps.protector.as_ref().map(|p| p.name()).unwrap_or("none"),
            "probed platform capabilities"
        );
        caps
    }

    /// No native facilities at all
    pub fn portable() -> Self {
        Self {
            keychain: false,
            protector: None,
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("keychain", &self.keychain)
            .field("protector", &self.protector.as_ref().map(|p| p.name()))
            .finish()
    }
}

#[cfg(windows)]
fn native_protector() -> Option<Arc<dyn Protector>> {
    Some(Arc::new(dpapi::Dpapi))
}

#[cfg(not(windows))]
fn native_protector() -> Option<Arc<dyn Protector>> {
    None
}

#[cfg(windows)]
mod dpapi {
    use std::io;

    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{LocalFree, HLOCAL};
    use windows::Win32::Security::Cryptography::{
        CryptProtectData, CryptUnprotectData, CRYPTPROTECT_UI_FORBIDDEN, CRYPT_INTEGER_BLOB,
    };

    use super::Protector;

    /// User-scoped DPAPI (CryptProtectData / CryptUnprotectData)
    pub struct Dpapi;

    fn blob(data: &[u8]) -> CRYPT_INTEGER_BLOB {
        CRYPT_INTEGER_BLOB {
            cbData: data.len() as u32,
            pbData: data.as_ptr() as *mut u8,
        }
    }

    /// Copy out a DPAPI-allocated buffer and release it
    unsafe fn take_output(out: CRYPT_INTEGER_BLOB) -> Vec<u8> {
        if out.pbData.is_null() {
            return Vec::new();
        }
        let bytes = std::slice::from_raw_parts(out.pbData, out.cbData as usize).to_vec();
        let _ = LocalFree(Some(HLOCAL(out.pbData as *mut _)));
        bytes
    }

    impl Protector for Dpapi {
        fn name(&self) -> &'static str {
            "dpapi"
        }

        fn protect(&self, data: &[u8], entropy: Option<&[u8]>) -> io::Result<Vec<u8>> {
            let input = blob(data);
            let extra = entropy.map(blob);
            let mut output = CRYPT_INTEGER_BLOB::default();
            unsafe {
                CryptProtectData(
                    &input,
                    PCWSTR::null(),
                    extra.as_ref().map(|b| b as *const CRYPT_INTEGER_BLOB),
                    None,
                    None,
                    CRYPTPROTECT_UI_FORBIDDEN,
                    &mut output,
                )
                .map_err(io::Error::other)?;
                Ok(take_output(output))
            }
        }

        fn unprotect(&self, data: &[u8], entropy: Option<&[u8]>) -> io::Result<Vec<u8>> {
            let input = blob(data);
            let extra = entropy.map(blob);
            let mut output = CRYPT_INTEGER_BLOB::default();
            unsafe {
                CryptUnprotectData(
                    &input,
                    None,
                    extra.as_ref().map(|b| b as *const CRYPT_INTEGER_BLOB),
                    None,
                    None,
                    CRYPTPROTECT_UI_FORBIDDEN,
                    &mut output,
                )
                .map_err(io::Error::other)?;
                Ok(take_output(output))
            }
        }
    }
}

/// Deterministic stand-in for a platform primitive, for tests
#[cfg(test)]
pub(crate) mod testing {
    use std::io;

    use sha2::{Digest, Sha256};

    use super::Protector;

    /// Prefixes a digest of the entropy and XORs the data with it.
    /// Unprotect fails when the entropy differs.
    pub struct FakeProtector;

    fn pad(entropy: Option<&[u8]>) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"fake-protector");
        hasher.update(entropy.unwrap_or_default());
        hasher.finalize().into()
    }

    impl Protector for FakeProtector {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn protect(&self, data: &[u8], entropy: Option<&[u8]>) -> io::Result<Vec<u8>> {
            let pad = pad(entropy);
            let mut out = pad.to_vec();
            out.extend(data.iter().zip(pad.iter().cycle()).map(|(d, p)| d ^ p));
            Ok(out)
        }

        fn unprotect(&self, data: &[u8], entropy: Option<&[u8]>) -> io::Result<Vec<u8>> {
            let pad = pad(entropy);
            if data.len() < pad.len() || data[..pad.len()] != pad {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "entropy mismatch"));
            }
            Ok(data[pad.len()..]
                .iter()
                .zip(pad.iter().cycle())
                .map(|(d, p)| d ^ p)
                .collect())
        }
    }
}
