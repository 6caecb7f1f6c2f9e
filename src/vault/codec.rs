//! Canonical byte encoding of a `VaultCollection`.
//!
//! The plaintext inside the encrypted payload is a compact JSON array of
//! entry objects, in collection order.  Timestamps are RFC 3339 strings.

use super::entry::VaultCollection;
use crate::errors::{PassVaultError, Result};

/// Encode a collection to its canonical JSON bytes.
pub fn encode(collection: &VaultCollection) -> Result<Vec<u8>> {
    serde_json::to_vec(collection)
        .map_err(|e| PassVaultError::SerializationError(format!("entries: {e}")))
}

/// Decode bytes produced by `encode`.
///
/// Structurally invalid input, or input that breaks an entry invariant
/// (blank required field, duplicate id), is `MalformedData`.
pub fn decode(bytes: &[u8]) -> Result<VaultCollection> {
    let collection: VaultCollection = serde_json::from_slice(bytes)
        .map_err(|e| PassVaultError::MalformedData(format!("entries JSON: {e}")))?;

    collection
        .validate()
        .map_err(|e| PassVaultError::MalformedData(e.to_string()))?;

    Ok(collection)
}
