#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Runs ideaseed with its settings and credentials inside `temp`.
fn ideaseed_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("ideaseed"));
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_CACHE_HOME", temp.path().join("cache"))
        .env_remove("IDEASEED_LOG")
        .arg("--config-file")
        .arg(temp.path().join("settings.json"))
        .arg("--no-auth-cache");
    cmd
}

#[test]
fn unknown_color_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .args(["--color", "ultraviolet", "Just a body"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ultraviolet"))
        .stderr(predicate::str::contains("teal"));
}

#[test]
fn six_tokens_are_too_many() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .args(["a", "b", "c", "d", "e", "f"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Too many arguments"));
}

#[test]
fn milestone_on_a_note_is_rejected_before_login() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .args(["-M", "v1.0", "Remember the milk"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--milestone"));
}

#[test]
fn note_flags_on_a_repository_are_rejected() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .args(["--pin", "seeds", "A title", "A body"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--pin"));
}

#[test]
fn version_prints_the_package_version() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn about_shows_the_settings_file() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.json"));
}

#[test]
fn update_prints_the_upgrade_command() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("cargo install ideaseed"));
}

#[test]
fn config_set_then_show() {
    let temp = TempDir::new().unwrap();

    ideaseed_cmd(&temp)
        .args(["config", "default_column", "Inbox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_column set to Inbox"));

    let stored = fs::read_to_string(temp.path().join("settings.json")).unwrap();
    assert!(stored.contains("Inbox"));

    ideaseed_cmd(&temp)
        .args(["config", "default_column"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inbox"));

    ideaseed_cmd(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_column"))
        .stdout(predicate::str::contains("Inbox"));
}

#[test]
fn config_rejects_unknown_keys() {
    let temp = TempDir::new().unwrap();
    ideaseed_cmd(&temp)
        .args(["config", "favourite_colour", "teal"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"));
    assert!(!temp.path().join("settings.json").exists());
}

#[test]
fn stored_none_turns_a_default_off() {
    let temp = TempDir::new().unwrap();

    ideaseed_cmd(&temp)
        .args(["config", "default_project", "<None>"])
        .assert()
        .success();

    // Without a project, --no-issue has nowhere to put the card.
    ideaseed_cmd(&temp)
        .args(["--no-issue", "seeds", "A title", "A body"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--no-issue"));
}

#[test]
fn logout_removes_the_credentials_file() {
    let temp = TempDir::new().unwrap();
    let cache = temp.path().join("auth.json");
    fs::write(&cache, r#"{"github": {"token": "t0ken"}}"#).unwrap();

    Command::new(cargo_bin("ideaseed"))
        .env("HOME", temp.path())
        .args(["logout", "--auth-cache"])
        .arg(&cache)
        .arg("--config-file")
        .arg(temp.path().join("settings.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!cache.exists());
}
