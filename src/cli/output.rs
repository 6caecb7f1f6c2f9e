//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{CredentialEntry, VaultCollection};

/// Shown in place of a password unless `--reveal` is passed.
const MASK: &str = "********";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Short form of an entry id, enough to look it up again.
pub fn short_id(entry: &CredentialEntry) -> String {
    entry.id().to_string()[..8].to_string()
}

/// Print a table of entries (ID, Title, Username, URL, Updated).
///
/// Passwords are never part of the table.
pub fn print_entries_table(entries: &VaultCollection) {
    if entries.is_empty() {
        info("No entries in this vault yet.");
        tip("Run `passvault add --title <TITLE> --username <USER>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Username", "URL", "Updated"]);

    for e in entries {
        table.add_row(vec![
            short_id(e),
            e.title().to_string(),
            e.username().to_string(),
            e.url().unwrap_or("").to_string(),
            e.updated_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one entry, masking the password unless `reveal`.
pub fn print_entry(entry: &CredentialEntry, reveal: bool) {
    let id = entry.id().to_string();
    let created = entry.created_at().format("%Y-%m-%d %H:%M:%S").to_string();
    let updated = entry.updated_at().format("%Y-%m-%d %H:%M:%S").to_string();
    let rows = [
        ("ID", id.as_str()),
        ("Title", entry.title()),
        ("Username", entry.username()),
        ("Password", if reveal { entry.secret() } else { MASK }),
        ("URL", entry.url().unwrap_or("-")),
        ("Notes", entry.notes().unwrap_or("-")),
        ("Created", created.as_str()),
        ("Updated", updated.as_str()),
    ];

    for (label, value) in rows {
        println!("{:>9}  {}", style(label).bold(), value);
    }
}

/// "1 entry" / "3 entries".
pub fn entry_count(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{n} entries")
    }
}
