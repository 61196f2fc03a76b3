//! Integration tests for the mdlinks binary
//!
//! Each test builds a small markdown tree in a temp dir and runs the CLI on it.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn repo(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full_path = temp_dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
    temp_dir
}

fn two_page_repo() -> TempDir {
    repo(&[
        ("README.md", "[guide](docs/guide.md)\n"),
        ("docs/guide.md", "# Guide\n[home](../README.md)\n"),
        ("docs/lonely.md", "no links\n"),
    ])
}

#[allow(deprecated)]
fn run(workdir: &Path, args: &[&str]) -> Output {
    Command::cargo_bin("mdlinks")
        .expect("binary")
        .current_dir(workdir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("command run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("markdown files"));
}

#[test]
fn test_report_all() {
    let repo = two_page_repo();
    let output = run(repo.path(), &[]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "README.md is mentioned in\n\
         \x20 docs/guide.md\n\
         \x20   1: # Guide\n\
         \x20   2: [home](../README.md)\n\
         \x20   3: \n\
         docs/guide.md is mentioned in\n\
         \x20 README.md\n\
         \x20   0: [guide](docs/guide.md)\n\
         \x20   1: \n"
    );
}

#[test]
fn test_root_flag_from_other_directory() {
    let repo = two_page_repo();
    let from_inside = run(repo.path(), &[]);
    let parent = repo.path().parent().unwrap();
    let root = repo.path().to_str().unwrap();
    let from_outside = run(parent, &["--root", root]);

    assert!(from_outside.status.success());
    assert_eq!(stdout(&from_inside), stdout(&from_outside));
}

#[test]
fn test_link_to_single_node() {
    let repo = two_page_repo();
    let output = run(&repo.path().join("docs"), &["--root", "..", "--link-to", "guide.md"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "docs/guide.md is mentioned in\n  README.md\n    0: [guide](docs/guide.md)\n    1: \n"
    );
}

#[test]
fn test_link_to_without_inbound_links() {
    let repo = two_page_repo();
    let output = run(repo.path(), &["--link-to", "docs/lonely.md"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "docs/lonely.md is mentioned in\n");
}

#[test]
fn test_link_to_missing_file() {
    let repo = two_page_repo();
    let output = run(repo.path(), &["--link-to", "nope.md"]);

    assert!(!output.status.success());
    assert_eq!(stdout(&output), "No file found: nope.md\n");
}

#[test]
fn test_link_to_missing_file_json() {
    let repo = two_page_repo();
    let output = run(repo.path(), &["--format", "json", "--link-to", "nope.md"]);

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["error"], "No file found: nope.md");
}

#[test]
fn test_decode_error_fails() {
    let repo = repo(&[("bad.md", "[x](bad%zz.md)\n")]);
    let output = run(repo.path(), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error while walking"), "stderr: {stderr}");
}

#[test]
fn test_missing_root_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["--root", "missing"]);
    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn test_unreadable_markdown_fails() {
    let repo = repo(&[("index.md", "plain\n")]);
    std::os::unix::fs::symlink(repo.path().join("nowhere.md"), repo.path().join("dead.md"))
        .unwrap();
    let output = run(repo.path(), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dead.md"), "stderr: {stderr}");
}

#[test]
fn test_orphans_listed() {
    let repo = repo(&[("index.md", "[gone](gone.md)\n")]);
    let output = run(repo.path(), &["--orphans"]);

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("gone.md (referenced by 1 link(s), not scanned)\n"));
}

#[test]
fn test_json_output() {
    let repo = repo(&[
        ("index.md", "[gone](gone.md)\n[me](index.md)\n"),
    ]);
    let output = run(repo.path(), &["--format", "json", "--orphans"]);
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["files_scanned"], 1);
    assert_eq!(body["node_count"], 2);
    assert_eq!(body["reports"][0]["path"], "gone.md");
    assert_eq!(body["reports"][1]["path"], "index.md");
    assert_eq!(body["reports"][1]["mentions"][0]["row"], 1);
    assert_eq!(body["orphans"][0], "gone.md");
}

#[test]
fn test_config_file_limits_depth() {
    let repo = repo(&[
        ("mdlinks.toml", "max_depth = 1\n"),
        ("top.md", "plain\n"),
        ("deep/page.md", "[top](../top.md)\n"),
    ]);
    let output = run(repo.path(), &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");

    let explicit = repo.path().join("none.toml");
    fs::write(&explicit, "").unwrap();
    let output = run(repo.path(), &["--config", explicit.to_str().unwrap()]);
    assert!(stdout(&output).starts_with("top.md is mentioned in\n  deep/page.md\n"));
}

#[test]
fn test_invalid_config_fails() {
    let repo = repo(&[("mdlinks.toml", "depth = \"deep\"\n"), ("a.md", "")]);
    let output = run(repo.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_rel_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["rel", "/a/b", "/a/c/d.md"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "../c/d.md\n");

    let output = run(temp_dir.path(), &["rel", "docs/x.md"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "docs/x.md\n");

    let output = run(temp_dir.path(), &["rel", "/abs", "relative"]);
    assert!(!output.status.success());
}
