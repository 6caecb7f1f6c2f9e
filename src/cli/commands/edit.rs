//! `passvault edit` — change fields of an existing credential.
//!
//! Only the fields given on the command line change.  For `--url` and
//! `--notes` an empty string clears the field.

use crate::cli::output;
use crate::cli::{existing_store, find_entry, prompt_password, read_entry_secret, Cli};
use crate::errors::{PassVaultError, Result};

/// Field changes requested on the command line.
pub struct EditArgs<'a> {
    pub title: Option<&'a str>,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub secret: bool,
}

impl EditArgs<'_> {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.username.is_none()
            && self.url.is_none()
            && self.notes.is_none()
            && !self.secret
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, query: &str, args: &EditArgs<'_>) -> Result<()> {
    if args.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "nothing to change — pass at least one of --title, --username, --url, --notes, --secret"
                .into(),
        ));
    }

    let store = existing_store(cli)?;
    let password = prompt_password()?;
    let mut entries = store.unlock(&password)?;

    let id = find_entry(&entries, query)?;
    let entry = entries
        .get_mut(id)
        .ok_or_else(|| PassVaultError::EntryNotFound(query.to_string()))?;

    if let Some(title) = args.title {
        entry.set_title(title)?;
    }
    if let Some(username) = args.username {
        entry.set_username(username)?;
    }
    if let Some(url) = args.url {
        entry.set_url(Some(url.to_string()));
    }
    if let Some(notes) = args.notes {
        entry.set_notes(Some(notes.to_string()));
    }
    if args.secret {
        let secret = read_entry_secret(&format!("New password for {}", entry.title()))?;
        entry.set_secret(secret.as_str())?;
    }
    let title = entry.title().to_string();

    store.persist(&entries, &password)?;

    output::success(&format!("Updated '{title}'"));

    Ok(())
}
