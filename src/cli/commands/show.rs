//! `passvault show` — print one credential.

use crate::cli::output;
use crate::cli::{existing_store, find_entry, prompt_password, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `show` command.
pub fn execute(cli: &Cli, query: &str, reveal: bool) -> Result<()> {
    let store = existing_store(cli)?;
    let password = prompt_password()?;
    let entries = store.unlock(&password)?;

    let id = find_entry(&entries, query)?;
    let entry = entries
        .get(id)
        .ok_or_else(|| PassVaultError::EntryNotFound(query.to_string()))?;

    output::print_entry(entry, reveal);
    if !reveal {
        output::tip("Pass --reveal to print the password.");
    }

    Ok(())
}
