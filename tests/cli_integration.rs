//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password is supplied through `PASSVAULT_PASSWORD` and entry
//! passwords through piped stdin, so no test needs a terminal.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "master-password-1";

/// Helper: a Command for the passvault binary, isolated from the caller's env.
fn passvault(tmp: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passvault").expect("binary should exist");
    cmd.current_dir(tmp.path())
        .env_remove("PASSVAULT_DIR")
        .env_remove("PASSVAULT_NEW_PASSWORD")
        .env_remove("RUST_LOG")
        .env("PASSVAULT_PASSWORD", PASSWORD);
    cmd
}

/// Helper: an initialised vault with one entry titled "Gmail".
fn vault_with_gmail() -> TempDir {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp).arg("init").assert().success();
    passvault(&tmp)
        .args(["add", "--title", "Gmail", "--username", "me@example.com"])
        .args(["--url", "https://mail.google.com"])
        .write_stdin("gmail-pass-123\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Gmail'"));
    tmp
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("passwd"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_on_missing_vault_fails() {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vault not found"));
}

#[test]
fn init_creates_both_vault_files() {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault created"));

    assert!(tmp.path().join(".passvault/salt.bin").is_file());
    assert!(tmp.path().join(".passvault/passwords.vault").is_file());
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp).arg("init").assert().success();
    passvault(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_password() {
    let tmp = TempDir::new().unwrap();
    passvault(&tmp)
        .env("PASSVAULT_PASSWORD", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
    assert!(!tmp.path().join(".passvault").exists());
}

#[test]
fn list_shows_entries_but_not_passwords() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"))
        .stdout(predicate::str::contains("me@example.com"))
        .stdout(predicate::str::contains("gmail-pass-123").not());
}

#[test]
fn show_masks_unless_reveal() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .args(["show", "Gmail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://mail.google.com"))
        .stdout(predicate::str::contains("gmail-pass-123").not());

    passvault(&tmp)
        .args(["show", "Gmail", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gmail-pass-123"));
}

#[test]
fn wrong_password_is_a_single_generic_error() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .env("PASSVAULT_PASSWORD", "not-the-password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong master password or corrupted vault"));
}

#[test]
fn edit_changes_fields() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .args(["edit", "Gmail", "--username", "other@example.com", "--url", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 'Gmail'"));

    passvault(&tmp)
        .args(["show", "Gmail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("other@example.com"))
        .stdout(predicate::str::contains("https://mail.google.com").not());
}

#[test]
fn edit_secret_reads_stdin() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .args(["edit", "Gmail", "--secret"])
        .write_stdin("rotated-pass-456\n")
        .assert()
        .success();

    passvault(&tmp)
        .args(["show", "Gmail", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rotated-pass-456"));
}

#[test]
fn edit_without_changes_fails() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .args(["edit", "Gmail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn delete_with_force_removes_entry() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .args(["delete", "Gmail", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'Gmail'"));

    passvault(&tmp)
        .args(["show", "Gmail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry matches"));
}

#[test]
fn passwd_switches_master_password() {
    let tmp = vault_with_gmail();
    passvault(&tmp)
        .env("PASSVAULT_NEW_PASSWORD", "brand-new-password")
        .arg("passwd")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entry re-encrypted"));

    passvault(&tmp).arg("list").assert().failure();
    passvault(&tmp)
        .env("PASSVAULT_PASSWORD", "brand-new-password")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"));
}

#[test]
fn vault_dir_flag_and_config_file_are_respected() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".passvault.toml"), "vault_dir = \"from-config\"\n").unwrap();

    passvault(&tmp).arg("init").assert().success();
    assert!(tmp.path().join("from-config/salt.bin").is_file());

    passvault(&tmp)
        .args(["--vault-dir", "from-flag", "init"])
        .assert()
        .success();
    assert!(tmp.path().join("from-flag/passwords.vault").is_file());
}
