//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The cost parameters are part of the vault format:
//! every payload written under format version 1 was keyed with `KDF_V1`,
//! so they are constants rather than settings.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Parallelism lanes.
    pub parallelism: u32,
}

/// Parameters for vault format version 1 (64 MB, 3 passes, 4 lanes).
///
/// Changing these makes every existing vault unreadable.
pub const KDF_V1: KdfParams = KdfParams {
    memory_kib: 65_536,
    iterations: 3,
    parallelism: 4,
};

/// Derive a 32-byte vault key from a master secret and salt using `KDF_V1`.
///
/// The same secret + salt always produce the same key.  A salt of the
/// wrong length is a caller bug and is rejected before any hashing.
pub fn derive_key(secret: &[u8], salt: &[u8]) -> Result<VaultKey> {
    derive_key_with_params(secret, salt, &KDF_V1)
}

fn derive_key_with_params(secret: &[u8], salt: &[u8], kdf: &KdfParams) -> Result<VaultKey> {
    if salt.len() != SALT_LEN {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "salt must be {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }

    let params = Params::new(
        kdf.memory_kib,
        kdf.iterations,
        kdf.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PassVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = VaultKey::zeroed();
    argon2
        .hash_password_into(secret, salt, key.as_mut_bytes())
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
