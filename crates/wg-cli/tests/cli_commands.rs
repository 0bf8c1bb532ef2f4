//! Integration tests for the wg CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FOREST: &str = r#"{
    "startNode": "clearing",
    "nodes": {
        "clearing": {
            "text": "You stand in a quiet clearing.",
            "choices": [
                { "text": "Enter the cave", "next": "cave" },
                { "text": "Unlock the gate", "next": "garden", "item": "key" },
                { "text": "Climb the old tree", "next": "tree" }
            ]
        },
        "cave": {
            "text": "Something glints on the cave floor.",
            "collectItem": "key",
            "choices": [{ "text": "Return to the clearing", "next": "clearing" }]
        },
        "tree": {
            "text": "A branch bends under you.",
            "roll": {
                "text": "Hold on",
                "outcomes": [
                    { "range": "1-3", "text": "You fall.", "next": "fall" },
                    { "range": "4-6", "text": "You reach the top.", "next": "garden" }
                ]
            }
        },
        "fall": { "text": "You land in the brambles.", "isEnd": true, "badEnding": true },
        "garden": { "text": "A hidden garden opens before you.", "isEnd": true }
    }
}"#;

const DRAFT: &str = r#"{
    "startNode": "a",
    "nodes": {
        "a": { "text": "Unfinished.", "choices": [{ "text": "Onward", "next": "nowhere" }] },
        "b": { "text": "Lonely.", "isEnd": true }
    }
}"#;

const CATALOG: &str = r#"{
    "stories": [
        { "id": "forest", "title": "The Whispering Forest", "description": "A short walk.", "author": "Ada" },
        { "id": "draft", "title": "Untold", "description": "", "author": "Ada", "work-in-progress": true }
    ]
}"#;

fn write_story(root: &Path, id: &str, json: &str) {
    fs::create_dir_all(root.join(id)).unwrap();
    fs::write(root.join(id).join("story.json"), json).unwrap();
}

/// Create a temp stories directory with a catalog, one good and one broken story.
fn test_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("stories.json"), CATALOG).unwrap();
    write_story(dir.path(), "forest", FOREST);
    write_story(dir.path(), "draft", DRAFT);
    dir
}

fn wg() -> Command {
    Command::cargo_bin("wg").unwrap()
}

fn dir_arg(dir: &TempDir) -> &str {
    dir.path().to_str().unwrap()
}

// ---------------------------------------------------------------------------
// general
// ---------------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    wg().arg("--help").assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("check"))
            .and(predicate::str::contains("play"))
            .and(predicate::str::contains("reset")),
    );
}

#[test]
fn unknown_story_fails() {
    let dir = test_library();
    wg().args(["graph", "nope", "-d", dir_arg(&dir)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("story not found"));
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_hides_work_in_progress() {
    let dir = test_library();
    wg().args(["list", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Whispering Forest")
                .and(predicate::str::contains("Untold").not())
                .and(predicate::str::contains("1 stories")),
        );
}

#[test]
fn list_all_includes_drafts() {
    let dir = test_library();
    wg().args(["list", "--all", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untold (draft)"));
}

#[test]
fn list_discovers_without_catalog() {
    let dir = TempDir::new().unwrap();
    write_story(dir.path(), "forest", FOREST);
    wg().args(["list", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("forest"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_story() {
    let dir = test_library();
    wg().args(["check", "forest", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed for 'forest'"));
}

#[test]
fn check_reports_dangling_reference() {
    let dir = test_library();
    wg().args(["check", "draft", "-d", dir_arg(&dir)])
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("missing node \"nowhere\"")
                .and(predicate::str::contains("cannot be reached")),
        );
}

#[test]
fn check_all_fails_if_any_story_fails() {
    let dir = test_library();
    wg().args(["check", "-d", dir_arg(&dir)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("All checks passed for 'forest'"))
        .stderr(predicate::str::contains("1 of 2 stories failed checks"));
}

#[test]
fn check_rejects_malformed_node() {
    let dir = TempDir::new().unwrap();
    write_story(
        dir.path(),
        "odd",
        r#"{ "startNode": "a", "nodes": { "a": { "text": "?", "isEnd": true, "roll": { "text": "x", "outcomes": [] } } } }"#,
    );
    wg().args(["check", "odd", "-d", dir_arg(&dir)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid node"));
}

// ---------------------------------------------------------------------------
// graph
// ---------------------------------------------------------------------------

#[test]
fn graph_outlines_story() {
    let dir = test_library();
    wg().args(["graph", "forest", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("5 nodes, 6 edges")
                .and(predicate::str::contains("[clearing] (start)"))
                .and(predicate::str::contains("(needs key)"))
                .and(predicate::str::contains("\"1-3: You fall.\""))
                .and(predicate::str::contains("[fall] (bad end)")),
        );
}

#[test]
fn graph_marks_missing_and_unreachable() {
    let dir = test_library();
    wg().args(["graph", "draft", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[nowhere] (missing)")
                .and(predicate::str::contains("unreachable"))
                .and(predicate::str::contains("1 missing targets")),
        );
}

// ---------------------------------------------------------------------------
// play / reset
// ---------------------------------------------------------------------------

#[test]
fn play_collects_and_uses_item() {
    let dir = test_library();
    wg().args(["play", "forest", "-d", dir_arg(&dir)])
        .write_stdin("1\n1\n2\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Whispering Forest")
                .and(predicate::str::contains("(uses key)"))
                .and(predicate::str::contains("A hidden garden opens before you.")),
        );
}

#[test]
fn play_saves_and_resumes() {
    let dir = test_library();
    wg().args(["play", "forest", "-d", dir_arg(&dir)])
        .write_stdin("1\nq\n")
        .assert()
        .success();

    let slot = dir.path().join(".saves").join("forest-save.json");
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&slot).unwrap()).unwrap();
    assert_eq!(saved["currentNode"], "cave");
    assert_eq!(saved["inventory"][0], "key");
    assert_eq!(saved["nodeHistory"][0]["node"], "clearing");

    wg().args(["play", "forest", "-d", dir_arg(&dir)])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Continuing your saved game")
                .and(predicate::str::contains("Something glints")),
        );
}

#[test]
fn play_new_ignores_save() {
    let dir = test_library();
    wg().args(["play", "forest", "-d", dir_arg(&dir)])
        .write_stdin("1\nq\n")
        .assert()
        .success();

    wg().args(["play", "forest", "--new", "-d", dir_arg(&dir)])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Continuing").not()
                .and(predicate::str::contains("quiet clearing")),
        );
}

#[test]
fn play_seeded_roll_is_reproducible() {
    let dir = test_library();
    let run = || {
        let saves = TempDir::new().unwrap();
        let output = wg()
            .args(["play", "forest", "--seed", "7", "--saves"])
            .arg(saves.path())
            .args(["-d", dir_arg(&dir)])
            .write_stdin("3\nr\n")
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };
    let first = run();
    assert!(first.contains("You rolled"));
    assert_eq!(first, run());
}

#[test]
fn play_upgrades_legacy_save() {
    let dir = test_library();
    fs::create_dir_all(dir.path().join(".saves")).unwrap();
    fs::write(
        dir.path().join(".saves").join("forest-save.json"),
        r#"{ "currentNode": "cave", "nodeHistory": ["clearing"], "inventory": ["key"] }"#,
    )
    .unwrap();

    wg().args(["play", "forest", "-d", dir_arg(&dir)])
        .write_stdin("b\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("quiet clearing"));
}

#[test]
fn play_falls_back_when_save_is_stale() {
    let dir = test_library();
    fs::create_dir_all(dir.path().join(".saves")).unwrap();
    fs::write(
        dir.path().join(".saves").join("forest-save.json"),
        r#"{ "currentNode": "deleted-node", "nodeHistory": [], "inventory": [] }"#,
    )
    .unwrap();

    wg().args(["play", "forest", "-d", dir_arg(&dir)])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Continuing").not()
                .and(predicate::str::contains("quiet clearing")),
        );
}

#[test]
fn reset_clears_save() {
    let dir = test_library();
    wg().args(["play", "forest", "-d", dir_arg(&dir)])
        .write_stdin("1\nq\n")
        .assert()
        .success();
    let slot = dir.path().join(".saves").join("forest-save.json");
    assert!(slot.exists());

    wg().args(["reset", "forest", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared save for 'forest'"));
    assert!(!slot.exists());
}

#[test]
fn reset_rejects_path_like_id() {
    let dir = test_library();
    let saves = dir.path().join("saves");
    fs::create_dir_all(&saves).unwrap();
    let outside = dir.path().join("victim-save.json");
    fs::write(&outside, "{}").unwrap();

    wg().args(["reset", "../victim", "--saves"])
        .arg(&saves)
        .args(["-d", dir_arg(&dir)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid story id"));
    assert!(outside.exists());
}
