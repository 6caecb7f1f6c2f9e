//! `passvault add` — store a new credential.

use crate::cli::output;
use crate::cli::{existing_store, prompt_password, read_entry_secret, Cli};
use crate::errors::Result;
use crate::vault::CredentialEntry;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    title: &str,
    username: &str,
    url: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let store = existing_store(cli)?;
    let password = prompt_password()?;
    let mut entries = store.unlock(&password)?;

    // Read the credential's own password only after the vault opened.
    let secret = read_entry_secret(&format!("Password for {title}"))?;

    let mut entry = CredentialEntry::new(title, username, secret.as_str())?;
    if let Some(url) = url {
        entry = entry.with_url(url);
    }
    if let Some(notes) = notes {
        entry = entry.with_notes(notes);
    }
    let short = output::short_id(&entry);

    entries.push(entry)?;
    store.persist(&entries, &password)?;

    output::success(&format!(
        "Added '{title}' ({short}), {} in vault",
        output::entry_count(entries.len())
    ));

    Ok(())
}
