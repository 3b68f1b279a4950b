extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Shelf {
    _dir: TempDir,
    file: PathBuf,
}

impl Shelf {
    fn new() -> Shelf {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("books.json");
        Shelf {
            _dir: dir,
            file: file,
        }
    }

    fn path(&self) -> &Path {
        &self.file
    }

    fn tome(&self) -> Command {
        let mut cmd = Command::cargo_bin("tome").expect("bin");
        cmd.env_remove("TOME_FILE")
            .env_remove("TOME_LOG")
            .arg("--file")
            .arg(&self.file);
        cmd
    }
}

#[test]
fn no_arguments_lists_without_creating_file() {
    let shelf = Shelf::new();

    shelf.tome()
        .assert()
        .success()
        .stdout(predicate::str::contains("Title"))
        .stdout(predicate::str::contains("No books yet"));

    assert!(!shelf.path().exists());
}

#[test]
fn add_read_rate_then_list() {
    let shelf = Shelf::new();

    shelf.tome()
        .args(&["add", "Dune:Frank Herbert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Dune' by Frank Herbert"));
    shelf.tome().args(&["read", "0"]).assert().success();
    shelf.tome().args(&["rate", "0:4"]).assert().success();

    shelf.tome()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("Frank Herbert"))
        .stdout(predicate::str::contains("Read"))
        .stdout(predicate::str::contains("★★★★"))
        .stdout(predicate::str::contains("1 book(s)"));
}

#[test]
fn legacy_flags_share_the_store() {
    let shelf = Shelf::new();

    shelf.tome().args(&["--add", "Solaris:Lem"]).assert().success();
    shelf.tome().args(&["--edit", "0::Stanisław Lem"]).assert().success();

    shelf.tome()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stanisław Lem"));

    shelf.tome().args(&["--del", "0"]).assert().success();
    shelf.tome().assert().success().stdout(predicate::str::contains("No books yet"));
}

#[test]
fn invalid_rating_fails_and_keeps_file() {
    let shelf = Shelf::new();
    shelf.tome().args(&["add", "Dune:Herbert"]).assert().success();
    let before = fs::read_to_string(shelf.path()).expect("read");

    shelf.tome()
        .args(&["rate", "0:6"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("between 1 and 5"));

    assert_eq!(fs::read_to_string(shelf.path()).expect("read"), before);
}

#[test]
fn delete_out_of_range_fails() {
    let shelf = Shelf::new();
    shelf.tome().args(&["add", "A:B"]).assert().success();
    shelf.tome().args(&["add", "C:D"]).assert().success();

    shelf.tome()
        .args(&["del", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No book at index `5`"));
}

#[test]
fn malformed_syntax_fails() {
    let shelf = Shelf::new();

    shelf.tome()
        .args(&["add", "just a title"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title:Author"));
    shelf.tome()
        .args(&["read", "first"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid index"));

    assert!(!shelf.path().exists());
}

#[test]
fn corrupt_file_is_reported() {
    let shelf = Shelf::new();
    fs::write(shelf.path(), "not json at all").expect("write");

    shelf.tome()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is malformed"))
        .stderr(predicate::str::contains("caused by:"));
}

#[test]
fn file_can_come_from_environment() {
    let shelf = Shelf::new();

    let mut cmd = Command::cargo_bin("tome").expect("bin");
    cmd.env("TOME_FILE", shelf.path())
        .args(&["add", "Kindred:Butler"])
        .assert()
        .success();

    assert!(shelf.path().exists());
}

#[test]
fn out_of_range_timestamp_is_reported_not_panicked() {
    let shelf = Shelf::new();
    fs::write(shelf.path(),
              r#"[{"title":"X","author":"Y","read":false,
                  "added_at":{"sec":9223372036854775807,"nsec":0},
                  "finished_at":null,"rating":0}]"#)
        .expect("write");

    shelf.tome()
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is malformed"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn record_breaking_invariants_is_reported() {
    let shelf = Shelf::new();
    fs::write(shelf.path(),
              r#"[{"title":"X","author":"Y","read":false,
                  "added_at":{"sec":5,"nsec":0},
                  "finished_at":{"sec":5,"nsec":0},"rating":9}]"#)
        .expect("write");

    shelf.tome()
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is malformed"))
        .stderr(predicate::str::contains("index `0` is invalid"))
        .stdout(predicate::str::contains("★").not());
}

#[test]
fn negative_index_is_out_of_range() {
    let shelf = Shelf::new();
    shelf.tome().args(&["add", "Dune:Herbert"]).assert().success();

    shelf.tome()
        .arg("--del=-1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No book at index `-1`"))
        .stderr(predicate::str::contains("syntax").not());
    shelf.tome()
        .args(&["rate", "-1:3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No book at index `-1`"));

    shelf.tome().assert().success().stdout(predicate::str::contains("1 book(s)"));
}

#[test]
fn huge_rating_is_an_invalid_rating() {
    let shelf = Shelf::new();
    shelf.tome().args(&["add", "Dune:Herbert"]).assert().success();

    shelf.tome()
        .args(&["rate", "0:99999999999999999999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("between 1 and 5"));
}
