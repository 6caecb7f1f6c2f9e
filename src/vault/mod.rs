//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `CredentialEntry` and `VaultCollection` types (`entry`)
//! - The canonical JSON encoding of a collection (`codec`)
//! - Salt/payload file layout and atomic writes (`format`)
//! - High-level `VaultStore` with `exists`, `unlock` and `persist` (`store`)

pub mod codec;
pub mod entry;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{CredentialEntry, VaultCollection};
pub use store::VaultStore;
