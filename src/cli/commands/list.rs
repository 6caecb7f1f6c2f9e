//! `passvault list` — display all credentials in a table.

use crate::cli::output;
use crate::cli::{existing_store, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = existing_store(cli)?;
    let password = prompt_password()?;
    let entries = store.unlock(&password)?;

    output::info(&output::entry_count(entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
