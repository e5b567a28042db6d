//! Integration tests for kodu CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn run_kodu(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_kodu"))
        .args(args)
        .env_remove("KODU_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn write(root: &Path, relative: &str, content: impl AsRef<[u8]>) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn create_project(dir: &Path) {
    write(dir, "src/index.ts", "export {};");
    write(dir, "src/index.test.ts", "test('x', () => {});");
    write(dir, "node_modules/lib/x.js", "module.exports = 1;");
    write(dir, "image.png", b"\x89PNG\r\n\x1a\n\0\0");
    write(dir, ".gitignore", "*.log\n");
    write(dir, "app.log", "x".repeat(200));
    write(dir, "package.json", "{}");
}

fn lines(stdout: &str) -> Vec<&str> {
    stdout.lines().collect()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_kodu(&["--help"]);

    assert!(success);
    assert!(stdout.contains("kodu"));
    assert!(stdout.contains("--exclude"));
    assert!(stdout.contains("--rank"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("patterns"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_kodu(&["--version"]);

    assert!(success);
    assert!(stdout.contains("kodu"));
}

#[test]
fn test_text_output() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_kodu(&[temp.path().to_str().unwrap()]);

    assert!(success);
    assert_eq!(
        lines(&stdout),
        vec!["package.json", "src/index.test.ts", "src/index.ts"]
    );
}

#[test]
fn test_files_subcommand_matches_default() {
    let temp = tempdir().unwrap();
    create_project(temp.path());
    let root = temp.path().to_str().unwrap();

    let (default_out, _, _) = run_kodu(&[root]);
    let (files_out, _, success) = run_kodu(&["files", root]);

    assert!(success);
    assert_eq!(default_out, files_out);
}

#[test]
fn test_json_output() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_kodu(&[temp.path().to_str().unwrap(), "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["mode"], "simple");
    let files = parsed["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["path"], "package.json");
    assert_eq!(files[0]["size"], 2);
}

#[test]
fn test_rank_output() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_kodu(&[temp.path().to_str().unwrap(), "--rank", "-o", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let paths: Vec<&str> = parsed["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["package.json", "src/index.ts", "src/index.test.ts"]);
    assert_eq!(parsed["files"][0]["score"], 100);
}

#[test]
fn test_rank_text_shows_scores() {
    let temp = tempdir().unwrap();
    write(temp.path(), "package.json", "{}");

    let (stdout, _, success) = run_kodu(&[temp.path().to_str().unwrap(), "--rank"]);

    assert!(success);
    let first = stdout.lines().next().unwrap();
    assert!(first.starts_with(" 100"));
    assert!(first.ends_with("package.json"));
}

#[test]
fn test_exclude_flag() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_kodu(&[
        temp.path().to_str().unwrap(),
        "--exclude",
        "*.test.ts",
        "-e",
        "package.json",
    ]);

    assert!(success);
    assert_eq!(lines(&stdout), vec!["src/index.ts"]);
}

#[test]
fn test_no_gitignore_flag() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_kodu(&[temp.path().to_str().unwrap(), "--no-gitignore"]);

    assert!(success);
    assert!(lines(&stdout).contains(&"app.log"));
}

#[test]
fn test_hidden_flag() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_kodu(&[temp.path().to_str().unwrap(), "--hidden"]);

    assert!(success);
    assert!(lines(&stdout).contains(&".gitignore"));
    assert!(!stdout.contains("node_modules"));
}

#[test]
fn test_skipped_report_on_stderr() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, stderr, success) = run_kodu(&[
        temp.path().to_str().unwrap(),
        "--skipped",
        "--max-size",
        "12",
    ]);

    assert!(success);
    assert!(!stdout.contains("image.png"));
    assert!(stderr.contains("Skipped"));
    assert!(stderr.contains("image.png"));
    assert!(stderr.contains("src/index.test.ts"));
    assert!(stderr.contains("too large"));
}

#[test]
fn test_gitignore_engine_reincludes() {
    let temp = tempdir().unwrap();
    write(temp.path(), ".gitignore", "*.log\n!keep.log\n");
    write(temp.path(), "keep.log", "k");
    write(temp.path(), "drop.log", "d");

    let root = temp.path().to_str().unwrap();

    let (stdout, stderr, success) = run_kodu(&[root]);
    assert!(success);
    assert!(stdout.trim().is_empty());
    assert!(stderr.contains("!keep.log"));

    let (stdout, _, success) = run_kodu(&[root, "--gitignore-engine"]);
    assert!(success);
    assert_eq!(lines(&stdout), vec!["keep.log"]);
}

#[test]
fn test_directory_named_like_subcommand() {
    let temp = tempdir().unwrap();
    write(temp.path(), "files/a.txt", "a");
    let files_dir = temp.path().join("files");

    let (stdout, _, success) = run_kodu(&["files", files_dir.to_str().unwrap()]);
    assert!(success);
    assert_eq!(lines(&stdout), vec!["a.txt"]);

    let (help, _, _) = run_kodu(&["--help"]);
    assert!(help.contains("./files"));
}

#[test]
fn test_patterns_subcommand() {
    let (stdout, _, success) = run_kodu(&["patterns", "build/", "!keep.log"]);

    assert!(success);
    assert!(stdout.contains("  build/**"));
    assert!(stdout.contains("  **/build/**"));
    assert!(stdout.contains("dropped"));
}

#[test]
fn test_missing_path_fails() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nope");

    let (stdout, stderr, success) = run_kodu(&[missing.to_str().unwrap()]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_file_path_fails() {
    let temp = tempdir().unwrap();
    write(temp.path(), "file.txt", "x");

    let (_, stderr, success) = run_kodu(&[temp.path().join("file.txt").to_str().unwrap()]);

    assert!(!success);
    assert!(stderr.contains("not a directory"));
}

#[test]
fn test_invalid_output_format() {
    let (_, stderr, success) = run_kodu(&[".", "--output", "xml"]);

    assert!(!success);
    assert!(stderr.contains("xml"));
}
