#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("parakeet").unwrap();
    c.current_dir(temp.path())
        .env("NO_COLOR", "1")
        .env_remove("PARAKEET_TAGS_FILE")
        .env_remove("RUST_LOG");
    c
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"content").unwrap();
}

fn names(dir: &Path) -> Vec<String> {
    let mut out: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    out.sort();
    out
}

#[test]
fn validate_clean_directory_succeeds() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "20250101T000000--first__work.md");
    touch(temp.path(), "20250101T000001--second.txt");

    cmd(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files: 2"))
        .stdout(predicate::str::contains("Valid: 2"))
        .stdout(predicate::str::contains("All files are properly formatted!"));
}

#[test]
fn validate_reports_malformed_and_fails() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "20250101T000000--ok.md");
    touch(temp.path(), "random notes.txt");

    cmd(&temp)
        .args(["validate", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ random notes.txt (invalid format)"))
        .stdout(predicate::str::contains("Invalid: 1"));
}

#[test]
fn validate_lists_duplicates_without_failing() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "20250101T000000--a.md");
    touch(temp.path(), "20250101T000000--b.md");

    cmd(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "⚠ 20250101T000000--a.md (duplicate timestamp: 20250101T000000)",
        ))
        .stdout(predicate::str::contains("Duplicates: 2"))
        .stdout(predicate::str::contains("Some files have duplicate timestamps."));
}

#[test]
fn validate_uses_registry_for_undefined_tags() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("tag.toml"),
        "[[tag]]\nkey = \"work\"\ndesc = \"Work stuff\"\n",
    )
    .unwrap();
    touch(temp.path(), "20250101T000000--a__work_misc.md");

    cmd(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("(undefined tags: misc)"))
        .stdout(predicate::str::contains("Total files: 1"));
}

#[test]
fn validate_missing_directory_errors() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["validate", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn validate_extension_filter_and_strict() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "x--short.md");
    touch(temp.path(), "notes.txt");

    cmd(&temp)
        .args(["validate", "--ext", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files: 1"));
    cmd(&temp)
        .args(["validate", "-e", "md", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("x--short.md (invalid format)"));
}

#[test]
fn generate_dry_run_leaves_files_alone() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "report.pdf");

    cmd(&temp)
        .args(["generate", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] Would rename: report.pdf -> "))
        .stdout(predicate::str::contains("Processed: 1"))
        .stdout(predicate::str::contains("Dry run"));
    assert_eq!(names(temp.path()), vec!["report.pdf"]);
}

#[test]
fn generate_renames_with_unique_identifiers() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a.txt");
    touch(temp.path(), "b.txt");
    touch(temp.path(), "20250101T000000--kept.md");

    cmd(&temp)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: 2"))
        .stdout(predicate::str::contains("Skipped: 1"));

    let after = names(temp.path());
    assert_eq!(after.len(), 3);
    assert!(after.iter().any(|n| n.ends_with("--a.txt")));
    assert!(after.iter().any(|n| n.ends_with("--b.txt")));
    let ids: std::collections::HashSet<&str> = after.iter().map(|n| &n[..15]).collect();
    assert_eq!(ids.len(), 3);

    cmd(&temp).arg("validate").assert().success();
}

#[test]
fn generate_leaves_registry_file_alone() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("tag.toml"), "").unwrap();

    cmd(&temp)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: 0"));
    assert_eq!(names(temp.path()), vec!["tag.toml"]);
}

#[test]
fn tag_set_renames_then_reports_no_change() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "20250101T000000--plan.md");

    cmd(&temp)
        .args(["tag", "20250101T000000--plan.md", "--set", "work", "-t", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✓ Renamed: 20250101T000000--plan.md → 20250101T000000--plan__alpha_work.md",
        ));
    assert!(temp.path().join("20250101T000000--plan__alpha_work.md").exists());

    cmd(&temp)
        .args(["tag", "20250101T000000", "--set", "work", "--set", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ No changes made"));
}

#[test]
fn tag_set_rejects_reserved_characters() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "20250101T000000--plan.md");

    cmd(&temp)
        .args(["tag", "20250101T000000--plan.md", "--set", "a_b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert!(temp.path().join("20250101T000000--plan.md").exists());
}

#[test]
fn tag_show_prints_parts() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "20250903T083109--meeting notes__work_urgent.md");

    cmd(&temp)
        .args(["tag", "20250903T083109", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Timestamp: 20250903T083109 (2025-09-03 08:31:09)",
        ))
        .stdout(predicate::str::contains("Comment: meeting notes"))
        .stdout(predicate::str::contains("Tags: work, urgent"));
}

#[test]
fn tag_requires_target() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("tag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: parakeet tag"));
}

#[test]
fn list_markdown_outputs_table() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "20250101T000000--alpha__x_y.md");
    touch(temp.path(), "unformatted.md");

    cmd(&temp)
        .args(["list", "--markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| ID | Title | Tags |"))
        .stdout(predicate::str::contains("| 20250101T000000 | alpha | x, y |"))
        .stdout(predicate::str::contains("unformatted").not());
}

#[test]
fn list_plain_table_and_empty_message() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No formatted files"));

    touch(temp.path(), "20250101T000000--alpha__x.md");
    cmd(&temp)
        .args(["list", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID"))
        .stdout(predicate::str::contains("alpha"));
}

#[test]
fn help_and_unknown_command() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parakeet generate"));
    cmd(&temp)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command: frobnicate"));
}

#[test]
fn unknown_flag_is_rejected() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["validate", "--bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown flag for validate: --bogus"));
}
