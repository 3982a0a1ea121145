//! End-to-end coverage of the `bit` binary, driven through `assert_cmd`.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn bit() -> Command {
    Command::cargo_bin("bit").unwrap()
}

#[test]
fn init_creates_metadata_directory() {
    let dir = tempdir().unwrap();
    bit()
        .current_dir(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty bit repository"));

    assert!(dir.path().join(".bit").join("objects").is_dir());
    assert!(dir.path().join(".bit").join("refs").join("heads").is_dir());
}

#[test]
fn init_twice_reports_already_exists() {
    let dir = tempdir().unwrap();
    bit().current_dir(&dir).arg("init").assert().success();
    bit()
        .current_dir(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository already exists"));
}

#[test]
fn add_commit_log_round_trip() {
    let dir = tempdir().unwrap();
    bit().current_dir(&dir).arg("init").assert().success();

    fs::write(dir.path().join("hello.txt"), b"hello\n").unwrap();
    bit()
        .current_dir(&dir)
        .args(["add", "hello.txt"])
        .assert()
        .success();

    bit()
        .current_dir(&dir)
        .args(["commit", "-m", "first commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Committed as"));

    bit()
        .current_dir(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("first commit"));
}

#[test]
fn commit_with_empty_index_reports_nothing_to_commit() {
    let dir = tempdir().unwrap();
    bit().current_dir(&dir).arg("init").assert().success();

    bit()
        .current_dir(&dir)
        .args(["commit", "-m", "no-op"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit"));
}

#[test]
fn status_reports_untracked_then_staged_file() {
    let dir = tempdir().unwrap();
    bit().current_dir(&dir).arg("init").assert().success();

    fs::write(dir.path().join("a.txt"), b"hi").unwrap();
    bit()
        .current_dir(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Untracked files"));

    bit()
        .current_dir(&dir)
        .args(["add", "a.txt"])
        .assert()
        .success();

    bit()
        .current_dir(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed"));
}

#[test]
fn branch_and_checkout_switch_working_tree() {
    let dir = tempdir().unwrap();
    bit().current_dir(&dir).arg("init").assert().success();

    fs::write(dir.path().join("shared.txt"), b"base").unwrap();
    bit()
        .current_dir(&dir)
        .args(["add", "shared.txt"])
        .assert()
        .success();
    bit()
        .current_dir(&dir)
        .args(["commit", "-m", "base commit"])
        .assert()
        .success();

    bit()
        .current_dir(&dir)
        .args(["checkout", "-b", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch feature"));

    fs::write(dir.path().join("feature-only.txt"), b"feature").unwrap();
    bit()
        .current_dir(&dir)
        .args(["add", "feature-only.txt"])
        .assert()
        .success();
    bit()
        .current_dir(&dir)
        .args(["commit", "-m", "feature commit"])
        .assert()
        .success();

    bit()
        .current_dir(&dir)
        .arg("branch")
        .assert()
        .success()
        .stdout(predicate::str::contains("* feature"))
        .stdout(predicate::str::contains("  master"));

    bit()
        .current_dir(&dir)
        .args(["checkout", "master"])
        .assert()
        .success();

    assert!(dir.path().join("shared.txt").exists());
    assert!(!dir.path().join("feature-only.txt").exists());
}

#[test]
fn checkout_unknown_branch_without_create_reports_not_found() {
    let dir = tempdir().unwrap();
    bit().current_dir(&dir).arg("init").assert().success();

    bit()
        .current_dir(&dir)
        .args(["checkout", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("branch nope not found"));
}

#[test]
fn branch_delete_removes_ref() {
    let dir = tempdir().unwrap();
    bit().current_dir(&dir).arg("init").assert().success();

    fs::write(dir.path().join("a.txt"), b"a").unwrap();
    bit().current_dir(&dir).args(["add", "a.txt"]).assert().success();
    bit()
        .current_dir(&dir)
        .args(["commit", "-m", "m1"])
        .assert()
        .success();

    bit()
        .current_dir(&dir)
        .args(["branch", "feature"])
        .assert()
        .success();
    bit()
        .current_dir(&dir)
        .args(["branch", "-d", "feature"])
        .assert()
        .success();

    bit()
        .current_dir(&dir)
        .args(["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}
