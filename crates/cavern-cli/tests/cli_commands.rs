//! Integration tests for the cavern CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HOUSE: &str = r#"
room porch "A creaky porch." exit in -> hall
item key "A brass key." alias "brass"
room hall "A dusty hall." exit out -> porch

word get "take"

action get key when here key then get key println "Taken."
action go any when exit word 2 then go word 2 look
action inventory then inventory
action quit then println "Bye." quit
action any then println "What?"
"#;

/// Write a script (and optionally a command file) into a temp directory.
fn setup(source: &str, commands: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("game.adv"), source).unwrap();
    if let Some(commands) = commands {
        fs::write(dir.path().join("commands.txt"), commands).unwrap();
    }
    dir
}

fn path(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn cavern() -> Command {
    let mut cmd = Command::cargo_bin("cavern").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn bundled(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../adventures")
        .join(name)
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_succeeds_with_valid_script() {
    let dir = setup(HOUSE, None);
    cavern()
        .args(["check", &path(&dir, "game.adv")])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("2 rooms, 1 items, 5 actions, 0 occurs")),
        );
}

#[test]
fn check_reports_undefined_room() {
    let dir = setup("room hall \"A hall.\" exit down -> cellar", None);
    cavern()
        .args(["check", &path(&dir, "game.adv")])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("undefined room")
                .and(predicate::str::contains("compilation failed with 1 error")),
        );
}

#[test]
fn check_reports_syntax_error_line() {
    let dir = setup("room a \"A\"\naction then quit", None);
    cavern()
        .args(["check", &path(&dir, "game.adv")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error at line 2"));
}

#[test]
fn check_missing_file_fails() {
    cavern()
        .args(["check", "/no/such/script.adv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot read"));
}

#[test]
fn check_bundled_adventure() {
    cavern()
        .arg("check")
        .arg(bundled("lantern.adv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rooms, 3 items"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_from_command_file() {
    let dir = setup(HOUSE, Some("take brass\ngo in\ninventory\nquit\n"));
    cavern()
        .args(["play", &path(&dir, "game.adv")])
        .args(["--script", &path(&dir, "commands.txt")])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("A creaky porch.")
                .and(predicate::str::contains("> take brass\nTaken."))
                .and(predicate::str::contains("A dusty hall."))
                .and(predicate::str::contains("  A brass key."))
                .and(predicate::str::contains("Bye."))
                .and(predicate::str::contains("Game over after 4 turns")),
        );
}

#[test]
fn play_no_look_skips_opening_description() {
    let dir = setup(HOUSE, Some("quit\n"));
    cavern()
        .args(["play", &path(&dir, "game.adv"), "--no-look"])
        .args(["--script", &path(&dir, "commands.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("A creaky porch.").not());
}

#[test]
fn play_stops_at_max_turns() {
    let dir = setup(HOUSE, Some("dance\ndance\ndance\nquit\n"));
    cavern()
        .args(["play", &path(&dir, "game.adv"), "--max-turns", "2"])
        .args(["--script", &path(&dir, "commands.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bye.").not().and(predicate::str::contains("What?")));
}

#[test]
fn play_reads_stdin_when_no_script() {
    let dir = setup(HOUSE, None);
    cavern()
        .args(["play", &path(&dir, "game.adv")])
        .write_stdin("take key\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("> Taken.").and(predicate::str::contains("Bye.")));
}

#[test]
fn play_bundled_adventure_to_the_end() {
    let dir = setup(
        "",
        Some("take lamp\nn\ngo down\nopen chest\nget coins\ngo up\ngo south\nlook\n"),
    );
    cavern()
        .arg("play")
        .arg(bundled("lantern.adv"))
        .args(["--seed", "7", "--script", &path(&dir, "commands.txt")])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The chest creaks open")
                .and(predicate::str::contains("Well done!"))
                .and(predicate::str::contains("Game over after 8 turns")),
        );
}

#[test]
fn play_runtime_error_fails() {
    let dir = setup(
        "room a \"A\"\naction jump then go up",
        Some("jump\n"),
    );
    cavern()
        .args(["play", &path(&dir, "game.adv")])
        .args(["--script", &path(&dir, "commands.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

#[test]
fn inspect_lists_rooms_and_items() {
    let dir = setup(HOUSE, None);
    cavern()
        .args(["inspect", &path(&dir, "game.adv")])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("porch (start)")
                .and(predicate::str::contains("in -> hall"))
                .and(predicate::str::contains("brass"))
                .and(predicate::str::contains("5 actions, 0 occurs")),
        );
}
