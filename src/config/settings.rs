use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.  Key-derivation cost is not here: it
/// is fixed by the vault format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root unless absolute) holding the vault.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Minimum length of a new master password.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".passvault".to_string()
}

fn default_min_password_len() -> usize {
    8
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            min_password_len: default_min_password_len(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.vault_dir.trim().is_empty() {
            return Err(PassVaultError::ConfigError(format!(
                "{}: vault_dir cannot be empty",
                config_path.display()
            )));
        }

        Ok(settings)
    }

    /// Resolve the vault directory.
    ///
    /// `override_dir` (from `--vault-dir` / `PASSVAULT_DIR`) wins over the
    /// config file.  Relative paths are taken from `project_dir`.
    pub fn vault_dir(&self, project_dir: &Path, override_dir: Option<&str>) -> PathBuf {
        let dir = override_dir.unwrap_or(&self.vault_dir);
        project_dir.join(dir)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
