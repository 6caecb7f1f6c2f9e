//! `passvault delete` — remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{existing_store, find_entry, prompt_password, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, query: &str, force: bool) -> Result<()> {
    let store = existing_store(cli)?;
    let password = prompt_password()?;
    let mut entries = store.unlock(&password)?;

    let id = find_entry(&entries, query)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let title = entries.get(id).map(|e| e.title().to_string()).unwrap_or_default();
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let removed = entries
        .remove(id)
        .ok_or_else(|| PassVaultError::EntryNotFound(query.to_string()))?;
    store.persist(&entries, &password)?;

    output::success(&format!("Deleted '{}'", removed.title()));

    Ok(())
}
