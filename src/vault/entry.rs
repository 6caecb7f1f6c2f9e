//! Credential entries and the ordered collection that holds them.
//!
//! Fields are private so the invariants hold by construction: required
//! fields are never blank, the id and creation time never change, and
//! every setter bumps `updated_at`.  Entries decoded from disk are checked
//! with `VaultCollection::validate`.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

/// A single credential stored in the vault.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    id: Uuid,
    title: String,
    username: String,
    #[serde(rename = "password")]
    secret: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialEntry {
    /// Create a new entry with a fresh id and both timestamps set to now.
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self> {
        let title = required("title", title.into())?;
        let username = required("username", username.into())?;
        let secret = required("password", secret.into())?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            username,
            secret,
            url: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Builder-style URL for freshly created entries.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = optional(Some(url.into()));
        self
    }

    /// Builder-style note for freshly created entries.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = optional(Some(notes.into()));
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The protected password value.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.title = required("title", title.into())?;
        self.touch();
        Ok(())
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> Result<()> {
        self.username = required("username", username.into())?;
        self.touch();
        Ok(())
    }

    /// Replace the password value.  The old value is wiped from memory.
    pub fn set_secret(&mut self, secret: impl Into<String>) -> Result<()> {
        let mut secret = required("password", secret.into())?;
        std::mem::swap(&mut self.secret, &mut secret);
        secret.zeroize();
        self.touch();
        Ok(())
    }

    /// Set or clear the URL.  A blank string clears it.
    pub fn set_url(&mut self, url: Option<String>) {
        self.url = optional(url);
        self.touch();
    }

    /// Set or clear the note.  A blank string clears it.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = optional(notes);
        self.touch();
    }

    /// Bump the modification time, never letting it fall behind creation.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("username", &self.username),
            ("password", &self.secret),
        ] {
            if value.trim().is_empty() {
                return Err(PassVaultError::InvalidEntry(format!(
                    "entry {} has an empty {field}",
                    self.id
                )));
            }
        }
        if self.updated_at < self.created_at {
            return Err(PassVaultError::InvalidEntry(format!(
                "entry {} was modified before it was created",
                self.id
            )));
        }
        Ok(())
    }
}

impl Drop for CredentialEntry {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("secret", &"********")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

fn required(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(PassVaultError::InvalidEntry(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The ordered set of entries in one vault.
///
/// Iteration follows insertion order; nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultCollection {
    entries: Vec<CredentialEntry>,
}

impl VaultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CredentialEntry> {
        self.entries.iter()
    }

    /// Append an entry.  Fails if an entry with the same id is present.
    pub fn push(&mut self, entry: CredentialEntry) -> Result<()> {
        if self.contains(entry.id) {
            return Err(PassVaultError::DuplicateEntry(entry.id));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&CredentialEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut CredentialEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Remove and return the entry with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: Uuid) -> Option<CredentialEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Check every entry invariant plus id uniqueness.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.id) {
                return Err(PassVaultError::DuplicateEntry(entry.id));
            }
            entry.validate()?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a VaultCollection {
    type Item = &'a CredentialEntry;
    type IntoIter = std::slice::Iter<'a, CredentialEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
