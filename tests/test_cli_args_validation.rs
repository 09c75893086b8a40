use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_host_prints_help_and_exits_2() {
    let mut cmd = Command::cargo_bin("check_nextcloud").unwrap();

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--token"));
}

#[test]
fn test_credentials_without_host_still_need_host() {
    let mut cmd = Command::cargo_bin("check_nextcloud").unwrap();
    cmd.arg("-u").arg("admin").arg("-p").arg("secret");

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("Hostname of the Nextcloud instance"));
}

#[test]
fn test_unknown_option_exits_1() {
    let mut cmd = Command::cargo_bin("check_nextcloud").unwrap();
    cmd.arg("-H").arg("cloud.example.com").arg("--frobnicate");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::starts_with("There was a problem reading the passed option"));
}

#[test]
fn test_non_boolean_ssl_value_exits_1() {
    let mut cmd = Command::cargo_bin("check_nextcloud").unwrap();
    cmd.arg("-H").arg("cloud.example.com").arg("-s").arg("perhaps");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("perhaps"));
}

#[test]
fn test_unreadable_config_file_exits_1() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.toml");

    let mut cmd = Command::cargo_bin("check_nextcloud").unwrap();
    cmd.arg("-H").arg("cloud.example.com").arg("-c").arg(&missing);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("missing.toml"));
}

#[test]
fn test_config_file_with_unknown_key_exits_1() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("check.toml");
    fs::write(&path, "hostname = \"cloud.example.com\"\n").unwrap();

    let mut cmd = Command::cargo_bin("check_nextcloud").unwrap();
    cmd.arg("-c").arg(&path);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("invalid config file"));
}
