//! High-level vault operations used by the CLI.
//!
//! `VaultStore` ties the format layer, the codec and the crypto layer
//! together behind three calls: `exists`, `unlock` and `persist`.  It
//! holds only paths.  The key is re-derived from the master password on
//! every call and dropped (zeroized) before the call returns.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_key, generate_salt};
use crate::errors::{PassVaultError, Result};

use super::codec;
use super::entry::VaultCollection;
use super::format::{self, PAYLOAD_FILE, SALT_FILE};

/// Handle on a vault directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    /// Directory holding the salt and payload files.
    dir: PathBuf,
    salt_path: PathBuf,
    payload_path: PathBuf,
}

impl VaultStore {
    /// Point a store at `dir`.  Nothing is read or created until
    /// `unlock` or `persist` is called.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            salt_path: dir.join(SALT_FILE),
            payload_path: dir.join(PAYLOAD_FILE),
            dir,
        }
    }

    /// Returns `true` if both the salt and the payload are on disk.
    ///
    /// A path that cannot be checked counts as missing here; `unlock` and
    /// `persist` report it as `IoFailure` instead.
    pub fn exists(&self) -> bool {
        self.try_exists().unwrap_or(false)
    }

    /// Like `exists`, but a path that cannot be checked is an `IoFailure`.
    pub fn try_exists(&self) -> Result<bool> {
        let (salt, payload) = self.presence()?;
        Ok(salt && payload)
    }

    /// Decrypt the vault with `password` and return its entries.
    ///
    /// An absent vault yields an empty collection; the vault is created by
    /// the first `persist`.  Wrong password, tampering and corruption all
    /// return `WrongSecretOrCorrupt`.  Read errors return `IoFailure`.
    pub fn unlock(&self, password: &str) -> Result<VaultCollection> {
        let (salt, payload) = self.presence()?;
        if !(salt && payload) {
            self.warn_if_half_present(salt, payload);
            tracing::debug!(dir = %self.dir.display(), "no vault yet, starting empty");
            return Ok(VaultCollection::new());
        }

        tracing::debug!(dir = %self.dir.display(), "unlocking vault");
        self.open_payload(password)
            .map_err(|e| self.fold_integrity_error(e))
    }

    /// Encrypt `collection` with `password` and write it to disk.
    ///
    /// The first call on a fresh directory generates and durably writes the
    /// salt before anything else.  The payload is replaced atomically.
    pub fn persist(&self, collection: &VaultCollection, password: &str) -> Result<()> {
        collection.validate()?;

        format::ensure_dir(&self.dir)?;

        // Only a salt that is really absent gets generated.
        let salt = if format::file_present(&self.salt_path)? {
            format::read_salt(&self.salt_path).map_err(|e| self.fold_integrity_error(e))?
        } else {
            if format::file_present(&self.payload_path)? {
                tracing::warn!(
                    path = %self.payload_path.display(),
                    "payload without salt cannot be decrypted, it will be replaced"
                );
            }
            let salt = generate_salt();
            format::write_salt(&self.salt_path, &salt)?;
            tracing::info!(dir = %self.dir.display(), "created new vault salt");
            salt
        };

        let key = derive_key(password.as_bytes(), &salt)?;
        let plaintext = Zeroizing::new(codec::encode(collection)?);
        let sealed = encrypt(&key, &plaintext)?;
        drop(key);

        format::write_atomic(&self.payload_path, &format::wrap_payload(&sealed))?;

        tracing::debug!(
            dir = %self.dir.display(),
            entries = collection.len(),
            "vault persisted"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the vault directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the salt file.
    pub fn salt_path(&self) -> &Path {
        &self.salt_path
    }

    /// Returns the path of the encrypted payload file.
    pub fn payload_path(&self) -> &Path {
        &self.payload_path
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn open_payload(&self, password: &str) -> Result<VaultCollection> {
        let salt = format::read_salt(&self.salt_path)?;
        let data = fs::read(&self.payload_path)
            .map_err(|e| PassVaultError::io(&self.payload_path, e))?;

        // The format tag is checked before the expensive derivation.
        let sealed = format::unwrap_payload(&data)?;

        let key = derive_key(password.as_bytes(), &salt)?;
        let plaintext = Zeroizing::new(decrypt(&key, sealed)?);
        drop(key);

        codec::decode(&plaintext)
    }

    /// Collapse every integrity failure into `WrongSecretOrCorrupt`,
    /// keeping the specific reason in the log only.
    fn fold_integrity_error(&self, err: PassVaultError) -> PassVaultError {
        if !err.is_integrity_failure() {
            return err;
        }
        match err {
            PassVaultError::AuthenticationFailure | PassVaultError::WrongSecretOrCorrupt => {
                tracing::debug!(dir = %self.dir.display(), "vault authentication failed");
            }
            other => {
                tracing::warn!(dir = %self.dir.display(), reason = %other, "vault is corrupt");
            }
        }
        PassVaultError::WrongSecretOrCorrupt
    }

    fn presence(&self) -> Result<(bool, bool)> {
        Ok((
            format::file_present(&self.salt_path)?,
            format::file_present(&self.payload_path)?,
        ))
    }

    fn warn_if_half_present(&self, salt: bool, payload: bool) {
        if salt != payload {
            tracing::warn!(
                dir = %self.dir.display(),
                salt,
                payload,
                "vault directory holds only one of its two files"
            );
        }
    }
}
