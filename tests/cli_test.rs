//! Integration tests: drive the apporte binary against rule files in a temp tree.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

/// A working directory plus an isolated user config directory.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("home/.config")).unwrap();
        fs::create_dir_all(root.path().join("work/project")).unwrap();
        Self { root }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    fn write(&self, rel: &str, content: &str) {
        fs::write(self.path(rel), content).unwrap();
    }

    /// `apporte` running in `work/project` with the sandboxed user config.
    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("apporte"));
        cmd.current_dir(self.path("work/project"))
            .env("HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("home/.config"))
            .env_remove("APPORTE_LOG");
        cmd
    }
}

fn rule(pattern: &str, output: &str) -> String {
    format!("[[rule]]\nmatch = '{pattern}'\napporte = {output}\n\n")
}

#[test]
fn test_explain_shows_expanded_command_without_running_it() {
    let sb = Sandbox::new();
    sb.write(
        "work/project/.apporte.toml",
        &rule(
            r"^gh:([\w-]+)/([\w.-]+)$",
            r#"["apporte-not-installed", "https://github.com/$1/$2"]"#,
        ),
    );

    sb.cmd()
        .args(["--explain", "gh:torvalds/linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"Command		: ["apporte-not-installed", "https://github.com/torvalds/linux"]"#,
        ))
        .stdout(predicate::str::contains("Rank		: 0"));
}

#[cfg(unix)]
#[test]
fn test_dispatches_winning_command() {
    let sb = Sandbox::new();
    sb.write("work/project/.apporte.toml", &rule(r"^hello (\w+)$", r#""echo hi $1""#));

    sb.cmd()
        .args(["-i", "hello world"])
        .assert()
        .success()
        .stdout("hi world\n");
}

#[cfg(unix)]
#[test]
fn test_reads_piped_stdin() {
    let sb = Sandbox::new();
    sb.write("work/project/.apporte.toml", &rule("^[a-f0-9]{7,40}$", r#""echo show $0""#));

    sb.cmd()
        .write_stdin("9a8c3f2\n")
        .assert()
        .success()
        .stdout("show 9a8c3f2\n");
}

#[test]
fn test_no_match_is_reported_and_succeeds() {
    let sb = Sandbox::new();
    sb.write("work/project/.apporte.toml", &rule("^never$", r#""echo x""#));

    sb.cmd()
        .arg("something-else")
        .assert()
        .success()
        .stdout(predicate::str::contains("No rules matched."));
}

#[test]
fn test_missing_input_fails() {
    let sb = Sandbox::new();

    sb.cmd()
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No input provided"));
}

#[cfg(unix)]
#[test]
fn test_directory_rules_beat_user_global() {
    let sb = Sandbox::new();
    sb.write("home/.config/.apporte.toml", &rule(".", r#""echo global""#));
    sb.write("work/.apporte.toml", &rule(".", r#""echo parent""#));
    sb.write("work/project/.apporte.toml", &rule("^$", r#""echo never""#));

    sb.cmd().arg("x").assert().success().stdout("parent\n");
}

#[cfg(unix)]
#[test]
fn test_user_global_used_as_fallback() {
    let sb = Sandbox::new();
    sb.write("home/.config/.apporte.toml", &rule(".", r#""echo global""#));

    sb.cmd().arg("x").assert().success().stdout("global\n");
}

#[cfg(unix)]
#[test]
fn test_config_flag_has_top_priority() {
    let sb = Sandbox::new();
    sb.write("work/project/.apporte.toml", &rule(".", r#""echo local""#));
    sb.write("override.toml", &rule(".", r#""echo override""#));

    sb.cmd()
        .arg("-c")
        .arg(sb.path("override.toml"))
        .arg("x")
        .assert()
        .success()
        .stdout("override\n");
}

#[cfg(unix)]
#[test]
fn test_load_warnings_do_not_stop_dispatch() {
    let sb = Sandbox::new();
    sb.write("work/.apporte.toml", "this is [not toml");
    sb.write(
        "work/project/.apporte.toml",
        &format!(
            "{}{}",
            rule("((", r#""echo broken""#),
            rule("^x$", r#"["echo", "two words"]"#)
        ),
    );

    sb.cmd()
        .arg("x")
        .assert()
        .success()
        .stdout("two words\n")
        .stderr(predicate::str::contains("Warnings while loading rules:"))
        .stderr(predicate::str::contains("rule 0: invalid regex"))
        .stderr(predicate::str::contains("failed to parse TOML"));
}

#[test]
fn test_unknown_program_fails_dispatch() {
    let sb = Sandbox::new();
    sb.write(
        "work/project/.apporte.toml",
        &rule(".", r#""apporte-missing-program-9d2e $0""#),
    );

    sb.cmd()
        .arg("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Dispatch failed: command not found: apporte-missing-program-9d2e",
        ));
}

#[test]
fn test_verbose_lists_lower_priority_matches() {
    let sb = Sandbox::new();
    sb.write(
        "work/project/.apporte.toml",
        &format!(
            "{}{}",
            rule(".", r#""apporte-missing-program-9d2e""#),
            rule("x", r#""echo second""#)
        ),
    );

    let assert = sb.cmd().args(["-v", "x"]).assert().code(1);
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("Also matched"));
    assert!(out.contains(r#"[1] x ("#));
}
