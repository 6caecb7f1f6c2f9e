//! `passvault init` — create a new, empty vault.

use crate::cli::output;
use crate::cli::{load_store, prompt_new_password, Cli, PASSWORD_ENV};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultCollection;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (settings, store) = load_store(cli)?;

    // 1. Refuse to clobber an existing vault.
    if store.try_exists()? {
        output::tip("Use `passvault add` to store credentials in the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(store.dir().to_path_buf()));
    }

    // 2. Prompt for a new password (with confirmation).
    let password = prompt_new_password(PASSWORD_ENV, settings.min_password_len)?;

    // 3. The first persist writes the salt and an empty payload.
    store.persist(&VaultCollection::new(), &password)?;

    output::success(&format!("Vault created at {}", store.dir().display()));
    output::tip("Add your first credential: passvault add --title <TITLE> --username <USER>");

    Ok(())
}
