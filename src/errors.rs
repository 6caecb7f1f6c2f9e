use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The AEAD tag did not verify: wrong key or altered ciphertext.
    #[error("Authentication failed — wrong key or tampered ciphertext")]
    AuthenticationFailure,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Payload / codec errors (folded into WrongSecretOrCorrupt by the store) ---
    #[error("Malformed vault data: {0}")]
    MalformedData(String),

    #[error("Unsupported vault format: {0}")]
    UnsupportedFormat(String),

    #[error("Salt file has {0} bytes, expected {expected}", expected = crate::crypto::kdf::SALT_LEN)]
    CorruptSalt(usize),

    // --- Vault errors ---
    /// The only integrity error a caller of `unlock` ever sees.
    #[error("Wrong master password or corrupted vault")]
    WrongSecretOrCorrupt,

    #[error("I/O error on {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Vault not found at {0} (run `passvault init` first)")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    // --- Entry errors ---
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Entry with id {0} already exists")]
    DuplicateEntry(Uuid),

    #[error("No entry matches '{0}'")]
    EntryNotFound(String),

    #[error("'{0}' matches more than one entry — use a longer id prefix")]
    AmbiguousEntry(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl PassVaultError {
    /// Attach a path to an I/O error from the vault engine.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for the error kinds that mean "this payload cannot be
    /// trusted", which the store reports as `WrongSecretOrCorrupt`.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailure
                | Self::MalformedData(_)
                | Self::UnsupportedFormat(_)
                | Self::CorruptSalt(_)
                | Self::WrongSecretOrCorrupt
        )
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
