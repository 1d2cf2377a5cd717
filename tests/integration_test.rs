use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Get a command for running the npkl binary
fn cmd() -> Command {
    cargo_bin_cmd!("npkl")
}

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("npkl"))
        .stdout(predicate::str::contains("PATH"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_node_modules_found() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/index.js"), "console.log(1)").unwrap();

    cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No node_modules directories found."));
}

#[test]
fn test_zero_arguments_uses_current_directory() {
    let dir = tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No node_modules directories found."));
}

#[test]
fn test_threads_and_disk_usage_flags() {
    let dir = tempdir().unwrap();

    cmd()
        .arg(dir.path())
        .args(["-t", "2", "--disk-usage"])
        .assert()
        .success();
}

#[test]
fn test_nonexistent_path() {
    let output = cmd()
        .arg("/nonexistent/path/that/does/not/exist")
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Cannot access path '/nonexistent/path/that/does/not/exist'"));
    assert_eq!(stderr.matches("No such file or directory").count(), 1);
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn test_file_instead_of_directory() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("file.txt");
    fs::write(&file_path, "content").unwrap();

    cmd()
        .arg(&file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_refuses_without_terminal_and_deletes_nothing() {
    let dir = tempdir().unwrap();
    let modules = dir.path().join("app/node_modules");
    fs::create_dir_all(modules.join("left-pad")).unwrap();
    fs::write(modules.join("left-pad/index.js"), "x".repeat(2048)).unwrap();

    cmd()
        .arg(dir.path())
        .write_stdin("Y\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to configure terminal"))
        .stderr(predicate::str::contains("not a terminal"));

    assert!(modules.join("left-pad/index.js").exists());
}
