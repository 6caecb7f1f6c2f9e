//! `passvault passwd` — change the vault master password.
//!
//! Unlocks with the current password and persists the same entries under
//! the new one.  The salt is part of the vault and does not change; the
//! new key comes from the new password alone.

use crate::cli::output;
use crate::cli::{load_store, prompt_new_password, prompt_password, Cli, NEW_PASSWORD_ENV};
use crate::errors::{PassVaultError, Result};

/// Execute the `passwd` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (settings, store) = load_store(cli)?;
    if !store.try_exists()? {
        return Err(PassVaultError::VaultNotFound(store.dir().to_path_buf()));
    }

    // 1. Open the vault with the current password.
    output::info("Enter your current master password.");
    let old_password = prompt_password()?;
    let entries = store.unlock(&old_password)?;

    // 2. Prompt for the new password.
    output::info("Choose your new master password.");
    let new_password = prompt_new_password(NEW_PASSWORD_ENV, settings.min_password_len)?;

    // 3. Re-encrypt; the payload is swapped atomically.
    store.persist(&entries, &new_password)?;

    output::success(&format!(
        "Master password changed ({} re-encrypted)",
        output::entry_count(entries.len())
    ));

    Ok(())
}
