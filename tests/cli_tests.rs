// ABOUTME: Integration tests for the CLI application
// ABOUTME: Runs the built binary for help, render, and resolve commands

use std::process::{Command, Output};

mod common;
use common::{TestProject, SIMPLE_LAYOUT};

fn panelkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_panelkit"))
        .args(args)
        .env("PANELKIT_LOG_LEVEL", "error")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute panelkit")
}

#[test]
fn test_cli_help_command() {
    let output = panelkit(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("panelkit"));
    assert!(stdout.contains("dashboard"));
    assert!(stdout.contains("render"));
}

#[test]
fn test_cli_version_command() {
    let output = panelkit(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_render_full_page_from_project() {
    let project = TestProject::new()
        .with_layout("base.html", SIMPLE_LAYOUT)
        .with_page("hello.html", "<p>{{greeting}}</p>");
    let root = project.path().to_str().unwrap();

    let output = panelkit(&[
        "render",
        "hello",
        "--templates",
        root,
        "--title",
        "Greeting",
        "--data",
        r#"{"greeting":"Hi"}"#,
    ]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<title>Greeting</title>"));
    assert!(stdout.contains("<p>Hi</p>"));
}

#[test]
fn test_render_partial_skips_layout() {
    let project = TestProject::new()
        .with_layout("base.html", SIMPLE_LAYOUT)
        .with_page("hello.html", "<p>partial</p>");
    let root = project.path().to_str().unwrap();

    let output = panelkit(&["render", "hello", "--templates", root, "--partial"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "<p>partial</p>");
}

#[test]
fn test_render_missing_page_prints_marker() {
    let project = TestProject::new();
    let root = project.path().to_str().unwrap();

    let output = panelkit(&["render", "ghost", "--templates", root, "--partial"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Template not found: ghost.html"));
}

#[test]
fn test_resolve_prefers_project_files() {
    let project = TestProject::new().with_layout("base.html", SIMPLE_LAYOUT);
    let root = project.path().to_str().unwrap();

    let output = panelkit(&["resolve", "base.html", "--templates", root]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("project layout"));

    let output = panelkit(&["resolve", "sidebar.html", "--templates", root]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("embedded layout"));
}

#[test]
fn test_resolve_unknown_template_fails() {
    let project = TestProject::new();
    let root = project.path().to_str().unwrap();

    let output = panelkit(&["resolve", "nowhere.html", "--templates", root]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nowhere.html"));
}
