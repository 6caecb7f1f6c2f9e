//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};

use clap::Parser;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::{VaultCollection, VaultStore};

/// Environment variable holding the master password (scripting / CI).
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// Environment variable holding the new master password for `passwd`.
pub const NEW_PASSWORD_ENV: &str = "PASSVAULT_NEW_PASSWORD";

/// Shortest id prefix accepted when looking an entry up.
const MIN_ID_PREFIX: usize = 4;

/// PassVault CLI: local encrypted password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .passvault, or vault_dir from .passvault.toml)
    #[arg(long, env = "PASSVAULT_DIR", global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Add a credential (password read from prompt or stdin)
    Add {
        /// Display title (e.g. "Gmail")
        #[arg(short, long)]
        title: String,
        /// Login name
        #[arg(short, long)]
        username: String,
        /// Reference URL
        #[arg(long)]
        url: Option<String>,
        /// Free-text note
        #[arg(long)]
        notes: Option<String>,
    },

    /// List all credentials
    List,

    /// Show one credential
    Show {
        /// Entry id, id prefix, or exact title
        entry: String,
        /// Print the password instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Change fields of a credential
    Edit {
        /// Entry id, id prefix, or exact title
        entry: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New login name
        #[arg(long)]
        username: Option<String>,
        /// New URL (empty string clears it)
        #[arg(long)]
        url: Option<String>,
        /// New note (empty string clears it)
        #[arg(long)]
        notes: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        secret: bool,
    },

    /// Delete a credential
    Delete {
        /// Entry id, id prefix, or exact title
        entry: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the vault's master password
    Passwd,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the current directory and build the store they point at.
pub fn load_store(cli: &Cli) -> Result<(Settings, VaultStore)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let dir = settings.vault_dir(&cwd, cli.vault_dir.as_deref());
    Ok((settings, VaultStore::new(dir)))
}

/// Like `load_store`, but fails with `VaultNotFound` if there is no vault yet.
pub fn existing_store(cli: &Cli) -> Result<VaultStore> {
    let (_, store) = load_store(cli)?;
    if !store.try_exists()? {
        return Err(PassVaultError::VaultNotFound(store.dir().to_path_buf()));
    }
    Ok(store)
}

/// Get the master password, from `PASSVAULT_PASSWORD` or an interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(PASSWORD_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// `env_var` is checked first for scripted use.  Enforces `min_len`.
pub fn prompt_new_password(env_var: &str, min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(env_var) {
        if pw.chars().count() < min_len {
            return Err(PassVaultError::CommandFailed(format!(
                "password must be at least {min_len} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

fn password_from_env(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Read a credential's password from piped stdin or a hidden prompt.
pub fn read_entry_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed);
        return Ok(buf);
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Resolve `query` to a single entry id.
///
/// An exact title wins.  Otherwise a full id or an id prefix of at least
/// four characters matches.  More than one match is `AmbiguousEntry`.
pub fn find_entry(collection: &VaultCollection, query: &str) -> Result<Uuid> {
    let mut matches: Vec<Uuid> = collection
        .iter()
        .filter(|e| e.title() == query)
        .map(|e| e.id())
        .collect();

    let needle = query.trim().to_ascii_lowercase();
    if matches.is_empty() && needle.len() >= MIN_ID_PREFIX {
        matches = collection
            .iter()
            .filter(|e| e.id().to_string().starts_with(&needle))
            .map(|e| e.id())
            .collect();
    }

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(PassVaultError::EntryNotFound(query.to_string())),
        _ => Err(PassVaultError::AmbiguousEntry(query.to_string())),
    }
}
