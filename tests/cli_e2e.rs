#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn roster_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("roster"));
    cmd.env("ROSTER_HOME", home.as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn add(home: &Path, id: &str, student_id: &str, first_name: &str) {
    roster_cmd(home)
        .args([
            "add",
            "--id",
            id,
            "--student-id",
            student_id,
            "--gender",
            "Female",
            "--first-name",
            first_name,
            "--last-name",
            "Reyes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student created"));
}

#[test]
fn test_student_lifecycle() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    add(home, "1", "S1", "Ana");
    add(home, "2", "S2", "Ben");

    roster_cmd(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Reyes").and(predicate::str::contains("Ben Reyes")));

    roster_cmd(home)
        .args(["update", "1", "--last-name", "Santos"])
        .assert()
        .success();

    let table = fs::read_to_string(home.join("db").join("students.txt")).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1|S1|Ana|Santos|Female|"));
    assert!(lines[1].starts_with("2|S2|Ben|Reyes|"));

    roster_cmd(home)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student deleted"));

    roster_cmd(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana").not());
    assert!(!home.join("storage").join("1").exists());
}

#[test]
fn test_duplicate_student_id_exits_with_error() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "1", "S1", "Ana");

    roster_cmd(temp.path())
        .args(["add", "--student-id", "S1", "--gender", "Male"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("already exists")));

    let table = fs::read_to_string(temp.path().join("db").join("students.txt")).unwrap();
    assert_eq!(table.lines().count(), 1);
}

#[test]
fn test_add_without_id_generates_one() {
    let temp = TempDir::new().unwrap();
    roster_cmd(temp.path())
        .args(["add", "--student-id", "S9", "--gender", "Other"])
        .assert()
        .success();

    let dirs: Vec<_> = fs::read_dir(temp.path().join("storage"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(dirs.len(), 1);
    assert_eq!(dirs[0].len(), 36, "expected a uuid, got {}", dirs[0]);
}

#[test]
fn test_photo_is_copied() {
    let temp = TempDir::new().unwrap();
    let photo = temp.path().join("me.jpg");
    fs::write(&photo, b"img").unwrap();

    roster_cmd(temp.path())
        .args(["add", "--id", "7", "--student-id", "S7", "--gender", "Male"])
        .arg("--photo")
        .arg(&photo)
        .assert()
        .success();

    let stored = temp.path().join("storage").join("7").join("photo.jpg");
    assert_eq!(fs::read(&stored).unwrap(), b"img");

    roster_cmd(temp.path())
        .args(["show", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains(stored.to_string_lossy().to_string()));
}

#[test]
fn test_missing_record_is_reported() {
    let temp = TempDir::new().unwrap();
    roster_cmd(temp.path())
        .args(["delete", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_config_controls_genders() {
    let temp = TempDir::new().unwrap();
    roster_cmd(temp.path())
        .args(["add", "--student-id", "S1", "--gender", "Secret"])
        .assert()
        .failure();

    roster_cmd(temp.path())
        .args(["config", "genders", "Male,Female,Secret"])
        .assert()
        .success();
    roster_cmd(temp.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("genders = Male,Female,Secret"));

    roster_cmd(temp.path())
        .args(["add", "--student-id", "S1", "--gender", "Secret"])
        .assert()
        .success();
}

#[test]
fn test_catalog_commands() {
    let temp = TempDir::new().unwrap();
    roster_cmd(temp.path())
        .args(["college", "add", "--id", "c1", "CAS", "Arts and Sciences"])
        .assert()
        .success();
    roster_cmd(temp.path())
        .args(["department", "add", "--college", "c1", "CS", "Computer Science"])
        .assert()
        .success();

    roster_cmd(temp.path())
        .args(["college", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arts and Sciences"));
    roster_cmd(temp.path())
        .args(["department", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Computer Science"));

    let colleges = fs::read_to_string(temp.path().join("db").join("colleges.txt")).unwrap();
    assert_eq!(colleges, "c1|CAS|Arts%20and%20Sciences\n");
}

#[test]
fn test_doctor_and_paths() {
    let temp = TempDir::new().unwrap();
    roster_cmd(temp.path()).arg("init").assert().success();
    fs::create_dir_all(temp.path().join("storage").join("ghost")).unwrap();

    roster_cmd(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("ghost"));
    roster_cmd(temp.path())
        .args(["doctor", "--fix"])
        .assert()
        .success();
    assert!(!temp.path().join("storage").join("ghost").exists());

    roster_cmd(temp.path())
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("students.txt").and(predicate::str::contains("config.json")));
}

#[test]
fn test_root_flag_overrides_env() {
    let env_home = TempDir::new().unwrap();
    let flag_home = TempDir::new().unwrap();

    roster_cmd(env_home.path())
        .arg("--root")
        .arg(flag_home.path())
        .arg("init")
        .assert()
        .success();

    assert!(flag_home.path().join("db").join("students.txt").exists());
    assert!(!env_home.path().join("db").exists());
}
