//! End-to-end tests driving the compiled `membook` binary against
//! throwaway workspaces.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn membook_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("membook");
    path
}

fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let memory = tmp.path().join("memory");
    fs::create_dir_all(&memory).unwrap();

    fs::write(
        memory.join("2026-02-24.md"),
        "## Morning\nWalked the dog\n## Evening\nRead a book\n",
    )
    .unwrap();
    fs::write(
        memory.join("2026-02-23.md"),
        "## Plans\nbuy groceries\npick up the parcel\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("MEMORY.md"),
        "## Summary\nThe agent walked the dog and read a book.\n",
    )
    .unwrap();

    tmp
}

fn run_membook(workspace: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = membook_binary();
    let output = Command::new(&binary)
        .env("MEMORYBOOK_WORKSPACE", workspace)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run membook binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_list_orders_daily_desc_then_core() {
    let tmp = setup_workspace();

    let (stdout, stderr, success) = run_membook(tmp.path(), &["list"]);
    assert!(success, "list failed: stdout={}, stderr={}", stdout, stderr);

    let pos_new = stdout.find("2026-02-24.md").expect("newest daily missing");
    let pos_old = stdout.find("2026-02-23.md").expect("older daily missing");
    let pos_core = stdout.find("MEMORY.md").expect("core file missing");
    assert!(pos_new < pos_old, "daily files not newest-first");
    assert!(pos_old < pos_core, "core file not listed last");
    assert!(stdout.contains("February 2026"));
}

#[test]
fn test_list_without_memory_dir_shows_core_only() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("MEMORY.md"), "core notes\n").unwrap();

    let (stdout, _, success) = run_membook(tmp.path(), &["list"]);
    assert!(success);
    assert!(stdout.contains("MEMORY.md"));
    assert!(!stdout.contains("2026-"));
}

#[test]
fn test_search_line_match_any_word_order() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_membook(tmp.path(), &["search", "dog walked"]);
    assert!(success);
    assert!(stdout.contains("2026-02-24.md:2"));
    assert!(stdout.contains("Walked the dog"));
}

#[test]
fn test_search_line_hits_before_section_hits() {
    let tmp = setup_workspace();

    // "groceries parcel" spans two lines of one section; "walked dog" sits
    // on single lines in two files.
    let (stdout, _, success) = run_membook(tmp.path(), &["search", "groceries parcel"]);
    assert!(success);
    assert!(stdout.contains("section: Plans"));

    let (stdout, _, success) = run_membook(tmp.path(), &["search", "walked dog"]);
    assert!(success);
    assert!(!stdout.contains("section:"), "line hits must not carry a section");
    let first = stdout.find("2026-02-24.md").unwrap();
    let second = stdout.find("MEMORY.md").unwrap();
    assert!(first < second, "catalog order not preserved among line hits");
}

#[test]
fn test_search_no_match() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_membook(tmp.path(), &["search", "zebra quantum"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_search_short_query_short_circuits() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_membook(tmp.path(), &["search", "d"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_view_prints_sections_with_ranges() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_membook(tmp.path(), &["view", "2026-02-24.md"]);
    assert!(success);
    assert!(stdout.contains("[Morning] (lines 1-2)"));
    assert!(stdout.contains("[Evening] (lines 3-4)"));
    assert!(stdout.contains("Walked the dog"));
}

#[test]
fn test_view_unknown_name_fails_cleanly() {
    let tmp = setup_workspace();

    let (_, stderr, success) = run_membook(tmp.path(), &["view", "nope.md"]);
    assert!(!success);
    assert!(stderr.contains("no memory file named"));
}

#[test]
fn test_missing_workspace_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let gone = tmp.path().join("does-not-exist");

    let (_, stderr, success) = run_membook(&gone, &["list"]);
    assert!(!success);
    assert!(stderr.contains("Workspace not found"));
}

#[test]
fn test_config_file_sets_core_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("SOUL.md"), "the soul file\n").unwrap();
    let config_path = tmp.path().join("memorybook.toml");
    fs::write(&config_path, r#"core_files = ["SOUL.md"]"#).unwrap();

    let binary = membook_binary();
    let output = Command::new(&binary)
        .env("MEMORYBOOK_WORKSPACE", tmp.path())
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("SOUL.md"));
    assert!(!stdout.contains("MEMORY.md"));
}
