//! End-to-end tests of the `hookwise` binary against a scratch repository

#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::panic)]

use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Repo {
    temp: TempDir,
}

impl Repo {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        git2::Repository::init(temp.path()).unwrap();
        Self { temp }
    }

    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn append_config(&self, text: &str) {
        let config = self.path().join(".git/config");
        let mut contents = fs::read_to_string(&config).unwrap();
        contents.push_str(text);
        fs::write(&config, contents).unwrap();
    }

    fn script(&self, relative: &str, body: &str) -> PathBuf {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn hookwise(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_hookwise"))
            .arg("-C")
            .arg(self.path())
            .args(args)
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("HOOKWISE_RUN_HOOKDIR")
            .env_remove("HOOKWISE_JOBS")
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
#[serial]
fn test_list_without_hooks() {
    let repo = Repo::new();
    let output = repo.hookwise(&["list", "pre-commit"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "no commands configured for hook 'pre-commit'"
    );
}

#[test]
#[serial]
fn test_list_json() {
    let repo = Repo::new();
    let lint = repo.script("tools/lint.sh", "exit 0");
    repo.append_config(&format!(
        "[hook \"pre-commit\"]\n\tcommand = lint\n[hookcmd \"lint\"]\n\tcommand = {}\n",
        lint.display()
    ));

    let output = repo.hookwise(&["list", "pre-commit", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["hooks"][0]["origin"], "local");
    assert_eq!(json["hooks"][0]["identity"], lint.to_string_lossy().as_ref());
}

#[test]
#[serial]
fn test_run_exit_code_is_ored() {
    let repo = Repo::new();
    let one = repo.script("tools/one.sh", "exit 1");
    let two = repo.script("tools/two.sh", "exit 2");
    repo.append_config(&format!(
        "[hook \"commit-msg\"]\n\tcommand = {}\n\tcommand = {}\n",
        one.display(),
        two.display()
    ));

    let output = repo.hookwise(&["run", "commit-msg"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
#[serial]
fn test_run_hook_stdout_goes_to_stderr() {
    let repo = Repo::new();
    let hook = repo.script("tools/echo.sh", "echo \"hello $1\"");
    repo.append_config(&format!(
        "[hook \"post-merge\"]\n\tcommand = {}\n",
        hook.display()
    ));

    let output = repo.hookwise(&["run", "post-merge", "--", "world"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("hello world"));
}

#[test]
#[serial]
fn test_run_missing_hooks() {
    let repo = Repo::new();

    let output = repo.hookwise(&["run", "pre-push"]);
    assert_eq!(output.status.code(), Some(1));

    let output = repo.hookwise(&["run", "pre-push", "--ignore-missing"]);
    assert!(output.status.success());
}

#[test]
#[serial]
fn test_error_policy_refuses_hookdir_script() {
    let repo = Repo::new();
    let marker = repo.path().join("ran");
    repo.script(".git/hooks/pre-commit", &format!("touch {}", marker.display()));

    let output = repo.hookwise(&[
        "-c",
        "hook.runHookDir=error",
        "run",
        "pre-commit",
        "--ignore-missing",
    ]);
    assert!(output.status.success());
    assert!(!marker.exists());

    let output = repo.hookwise(&["run", "pre-commit", "--run-hookdir", "yes"]);
    assert!(output.status.success());
    assert!(marker.exists());
}

#[test]
#[serial]
fn test_conflicting_stdin_is_an_error() {
    let repo = Repo::new();
    let input = repo.path().join("input");
    fs::write(&input, "x\n").unwrap();

    let output = repo.hookwise(&[
        "run",
        "pre-push",
        "--ignore-missing",
        "--to-stdin",
        input.to_str().unwrap(),
        "--stdin-line",
        "y",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be used together"));
}
