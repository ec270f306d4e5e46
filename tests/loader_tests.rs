// ABOUTME: Integration tests for template resolution
// ABOUTME: Covers cascade order, embedded fallbacks, failure reporting, and freshness

use serde_json::json;

mod common;
use common::TestProject;

use panelkit::template::{TemplateError, TemplateOrigin};

#[test]
fn test_project_layout_wins_over_embedded() {
    let project = TestProject::new().with_layout("base.html", "project {{title}}");
    let loader = project.memory_loader(&[("layouts/base.html", "embedded {{title}}")]);

    let template = loader.load("base.html").unwrap();
    assert_eq!(
        template.origin(),
        &TemplateOrigin::ProjectLayout(project.path().join("layouts/base.html"))
    );
    assert_eq!(template.render(&json!({ "title": "T" })).unwrap(), "project T");
}

#[test]
fn test_project_layout_wins_over_project_page() {
    let project = TestProject::new()
        .with_layout("shared.html", "from layouts")
        .with_page("shared.html", "from pages");

    let template = project.loader().load("shared.html").unwrap();
    assert_eq!(template.render(&json!({})).unwrap(), "from layouts");
}

#[test]
fn test_project_page_wins_over_embedded_layout() {
    let project = TestProject::new().with_page("users.html", "project page");
    let loader = project.memory_loader(&[("layouts/users.html", "embedded layout")]);

    let template = loader.load("users.html").unwrap();
    assert!(matches!(template.origin(), TemplateOrigin::ProjectPage(_)));
    assert_eq!(template.render(&json!({})).unwrap(), "project page");
}

#[test]
fn test_embedded_fallback_order() {
    let project = TestProject::new();
    let loader = project.memory_loader(&[
        ("pages/dual.html", "embedded page"),
        ("dual.html", "embedded root"),
        ("root-only.html", "root"),
    ]);

    let dual = loader.load("dual.html").unwrap();
    assert_eq!(
        dual.origin(),
        &TemplateOrigin::EmbeddedPage("pages/dual.html".into())
    );

    let root = loader.load("root-only.html").unwrap();
    assert!(root.origin().is_embedded());
    assert_eq!(root.render(&json!({})).unwrap(), "root");
}

#[test]
fn test_not_found_names_template_and_locations() {
    let project = TestProject::new();
    let loader = project.memory_loader(&[]);

    let err = loader.load("missing.html").unwrap_err();
    assert!(err.is_not_found());

    let message = err.to_string();
    assert!(message.contains("missing.html"));
    assert!(message.contains("not found in project or embedded assets"));
    match err {
        TemplateError::NotFound { searched, .. } => assert_eq!(searched.len(), 5),
        other => panic!("expected not found, got {:?}", other),
    }
}

#[test]
fn test_project_only_loader_probes_two_locations() {
    let project = TestProject::new();
    let loader = project.loader();

    assert_eq!(loader.candidates("x.html").len(), 2);
    match loader.load("x.html").unwrap_err() {
        TemplateError::NotFound { searched, .. } => assert_eq!(searched.len(), 2),
        other => panic!("expected not found, got {:?}", other),
    }
}

#[test]
fn test_parse_error_is_not_retried_against_later_candidates() {
    let project = TestProject::new().with_layout("broken.html", "{{#if}}");
    let loader = project.memory_loader(&[("layouts/broken.html", "fine")]);

    let err = loader.load("broken.html").unwrap_err();
    assert!(matches!(err, TemplateError::Syntax { .. }));
}

#[test]
fn test_edits_are_picked_up_between_loads() {
    let project = TestProject::new().with_page("live.html", "v1");
    let loader = project.loader();
    assert_eq!(loader.load("live.html").unwrap().render(&json!({})).unwrap(), "v1");

    project.write_page("live.html", "v2");
    assert_eq!(loader.load("live.html").unwrap().render(&json!({})).unwrap(), "v2");
}

#[test]
fn test_traversal_names_are_rejected() {
    let project = TestProject::new();
    let loader = project.bundled_loader();

    for name in ["../secret.html", "/etc/passwd", ""] {
        assert!(
            matches!(loader.load(name), Err(TemplateError::InvalidName(_))),
            "{} should be rejected",
            name
        );
    }
}

#[test]
fn test_bundled_defaults_resolve() {
    let project = TestProject::new();
    let loader = project.bundled_loader();

    for name in ["base.html", "sidebar.html", "dashboard.html", "users-table.html", "activity.html"] {
        let template = loader.load(name).unwrap();
        assert!(template.origin().is_embedded(), "{} should come from the bundle", name);
    }
}

#[test]
fn test_custom_directory_names() {
    let project = TestProject::new();
    std::fs::create_dir_all(project.path().join("views")).unwrap();
    std::fs::write(project.path().join("views/home.html"), "custom").unwrap();

    let loader = project.loader().with_dirs("frames", "views");
    let template = loader.load("home.html").unwrap();
    assert!(matches!(template.origin(), TemplateOrigin::ProjectPage(_)));
}
