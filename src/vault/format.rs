//! On-disk layout of a vault and the atomic write path.
//!
//! A vault is a directory holding two files:
//!
//! ```text
//! salt.bin          [salt: 32 bytes]
//! passwords.vault   [PVLT: 4 bytes][version: 1 byte][nonce: 12 bytes][ciphertext + tag]
//! ```
//!
//! - **Magic** (`PVLT`) and **version** form an unauthenticated format
//!   tag, checked before any key derivation so an unknown or foreign file
//!   can be told apart from a failed decryption in the logs.
//! - Everything after the tag is the AES-256-GCM output of
//!   `crypto::encryption::encrypt`.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::crypto::kdf::SALT_LEN;
use crate::errors::{PassVaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every payload file.
const MAGIC: &[u8; 4] = b"PVLT";

/// Current payload format version.  Bound to `crypto::kdf::KDF_V1`.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version).
pub const PREFIX_LEN: usize = 5;

/// File name of the salt inside the vault directory.
pub const SALT_FILE: &str = "salt.bin";

/// File name of the encrypted payload inside the vault directory.
pub const PAYLOAD_FILE: &str = "passwords.vault";

// ---------------------------------------------------------------------------
// Payload envelope
// ---------------------------------------------------------------------------

/// Prefix `sealed` (nonce || ciphertext) with the format tag.
pub fn wrap_payload(sealed: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(PREFIX_LEN + sealed.len());
    buf.extend_from_slice(MAGIC);
    buf.push(CURRENT_VERSION);
    buf.extend_from_slice(sealed);
    buf
}

/// Check the format tag and return the sealed bytes that follow it.
pub fn unwrap_payload(data: &[u8]) -> Result<&[u8]> {
    if data.len() < PREFIX_LEN {
        return Err(PassVaultError::UnsupportedFormat(
            "file too small to be a vault payload".into(),
        ));
    }
    if &data[..4] != MAGIC {
        return Err(PassVaultError::UnsupportedFormat(
            "missing PVLT magic bytes".into(),
        ));
    }
    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(PassVaultError::UnsupportedFormat(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }
    Ok(&data[PREFIX_LEN..])
}

// ---------------------------------------------------------------------------
// Salt file
// ---------------------------------------------------------------------------

/// Read the salt file and check its length.
pub fn read_salt(path: &Path) -> Result<[u8; SALT_LEN]> {
    let data = fs::read(path).map_err(|e| PassVaultError::io(path, e))?;
    data.as_slice()
        .try_into()
        .map_err(|_| PassVaultError::CorruptSalt(data.len()))
}

/// Write a new salt file.  Goes through `write_atomic` so a crash never
/// leaves a truncated salt behind.
pub fn write_salt(path: &Path, salt: &[u8; SALT_LEN]) -> Result<()> {
    write_atomic(path, salt)
}

// ---------------------------------------------------------------------------
// Atomic writes
// ---------------------------------------------------------------------------

/// Write `data` to `path` **atomically** and durably.
///
/// 1. Write to a temp file in the same directory.
/// 2. fsync the temp file.
/// 3. Rename it over the target path.
/// 4. fsync the directory (Unix) so the rename itself survives power loss.
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = parent_dir(path);
    let tmp_path = temp_path_for(path);

    let result = write_and_sync(&tmp_path, data).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| PassVaultError::io(path, e))
    });

    if result.is_err() {
        // Best effort: the original error is what matters.
        let _ = fs::remove_file(&tmp_path);
        return result;
    }

    sync_dir(parent)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    parent_dir(path).join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn write_and_sync(tmp_path: &Path, data: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // Owner-only from the moment the file exists.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(tmp_path)
        .map_err(|e| PassVaultError::io(tmp_path, e))?;
    file.write_all(data)
        .and_then(|()| file.sync_all())
        .map_err(|e| PassVaultError::io(tmp_path, e))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    fs::File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| PassVaultError::io(dir, e))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

/// Report whether `path` holds a regular file.
///
/// Only `NotFound` means absent.  Any other failure to stat the path, or an
/// entry that is not a regular file, is an `IoFailure`.
pub fn file_present(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(true),
        Ok(_) => Err(PassVaultError::io(
            path,
            io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PassVaultError::io(path, e)),
    }
}

/// Create the vault directory (owner-only on Unix) if it is missing.
///
/// A newly created directory is made durable by syncing its parent.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(PassVaultError::io(dir, e)),
    }
    fs::create_dir_all(dir).map_err(|e| PassVaultError::io(dir, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
            .map_err(|e| PassVaultError::io(dir, e))?;
    }

    sync_dir(parent_dir(dir))
}
