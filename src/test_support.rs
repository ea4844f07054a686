//! Helpers for tests that drive a real `git` executable.

use std::path::Path;
use std::process::{Command, Output};

/// Runs git with a fixed identity so commits work on unconfigured hosts.
pub fn git(dir: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .args(["-c", "user.name=wcsync", "-c", "user.email=wcsync@localhost"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git")
}

/// Tests needing git return early when it is not installed.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

pub fn init_repository(dir: &Path) {
    let output = git(dir, &["init", "--quiet"]);
    assert!(output.status.success(), "git init failed: {output:?}");
}

pub fn commit_all(dir: &Path) {
    let output = git(dir, &["add", "--all"]);
    assert!(output.status.success(), "git add failed: {output:?}");
    let output = git(dir, &["commit", "--quiet", "-m", "snapshot"]);
    assert!(output.status.success(), "git commit failed: {output:?}");
}

pub fn git_status(dir: &Path) -> String {
    String::from_utf8_lossy(&git(dir, &["status", "--porcelain"]).stdout).into_owned()
}
