// ABOUTME: Integration tests for page rendering through layouts
// ABOUTME: Covers full documents, HTMX fragments, control flags, and inline error markers

use serde_json::json;
use std::collections::HashMap;

mod common;
use common::{TestProject, SIMPLE_LAYOUT};

use panelkit::render::{HeaderLookup, PageOptions, FULL_LAYOUT_KEY, MAIN_LAYOUT_KEY};

fn htmx_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("HX-Request".to_string(), "true".to_string());
    headers
}

fn project() -> TestProject {
    TestProject::new()
        .with_layout("base.html", SIMPLE_LAYOUT)
        .with_layout("minimal.html", "<div class=\"minimal\">{{{content}}}</div>")
        .with_page("users.html", "<h1>{{heading}}</h1>")
}

#[test]
fn test_partial_request_returns_only_content() {
    let project = project();
    let page = project.layout_page(project.loader());
    let headers = htmx_headers();

    let result = page.render_page(
        Some(&headers as &dyn HeaderLookup),
        "users",
        &json!({ "heading": "Users" }),
        &PageOptions::new("Users"),
    );
    assert_eq!(result.html, "<h1>Users</h1>");
    assert_eq!(result.title, "Users");
}

#[test]
fn test_full_request_wraps_content_in_layout() {
    let project = project();
    let page = project.layout_page(project.loader());

    let options = PageOptions::new("Users")
        .current_page("users")
        .description("All accounts")
        .meta_tag("keywords", "admin");
    let result = page.render_page(None, "users", &json!({ "heading": "Users" }), &options);

    assert_eq!(
        result.html,
        "<html><head><title>Users</title></head><body data-page=\"users\"><h1>Users</h1></body></html>"
    );
    assert_eq!(result.current_page, "users");
    assert_eq!(result.description, "All accounts");
    assert_eq!(result.meta_tags.get("keywords").map(String::as_str), Some("admin"));
}

#[test]
fn test_non_true_header_value_is_full_render() {
    let project = project();
    let page = project.layout_page(project.loader());
    let mut headers = HashMap::new();
    headers.insert("HX-Request".to_string(), "false".to_string());

    let result = page.render_page(
        Some(&headers as &dyn HeaderLookup),
        "users",
        &json!({ "heading": "Users" }),
        &PageOptions::new("Users"),
    );
    assert!(result.html.starts_with("<html>"));
}

#[test]
fn test_full_layout_false_forces_fragment() {
    let project = project();
    let page = project.layout_page(project.loader());

    let options = PageOptions::new("Users").meta_tag(FULL_LAYOUT_KEY, "false");
    let result = page.render_page(None, "users", &json!({ "heading": "Users" }), &options);
    assert_eq!(result.html, "<h1>Users</h1>");
    assert!(result.meta_tags.is_empty());
}

#[test]
fn test_full_layout_true_overrides_partial_request() {
    let project = project();
    let page = project.layout_page(project.loader());
    let headers = htmx_headers();

    let options = PageOptions::new("Users").meta_tag(FULL_LAYOUT_KEY, "true");
    let result = page.render_page(
        Some(&headers as &dyn HeaderLookup),
        "users",
        &json!({ "heading": "Users" }),
        &options,
    );
    assert!(result.html.starts_with("<html>"));
    assert!(result.html.contains("<h1>Users</h1>"));

    let typed = PageOptions::new("Users").full_document();
    let result = page.render_page(
        Some(&headers as &dyn HeaderLookup),
        "users",
        &json!({ "heading": "Users" }),
        &typed,
    );
    assert!(result.html.starts_with("<html>"));
}

#[test]
fn test_main_layout_overrides_bound_layout() {
    let project = project();
    let page = project.layout_page(project.loader());

    let options = PageOptions::new("Users").meta_tag(MAIN_LAYOUT_KEY, "minimal.html");
    let result = page.render_page(None, "users", &json!({ "heading": "Users" }), &options);
    assert_eq!(result.html, "<div class=\"minimal\"><h1>Users</h1></div>");

    // The bound layout is untouched for later renders.
    let again = page.render_page(
        None,
        "users",
        &json!({ "heading": "Users" }),
        &PageOptions::new("Users"),
    );
    assert!(again.html.starts_with("<html>"));
}

#[test]
fn test_missing_page_renders_marker_inside_layout() {
    let project = project();
    let page = project.layout_page(project.loader());

    let result = page.render_page(None, "missing", &json!({}), &PageOptions::new("Missing"));
    assert!(result.html.starts_with("<html>"));
    assert!(result
        .html
        .contains("<div class=\"render-error\">Template not found: missing.html</div>"));
}

#[test]
fn test_page_execution_error_is_inline() {
    let project = project();
    let page = project.layout_page(project.loader());

    // `heading` is absent, which strict mode refuses to render.
    let result = page.render_page(None, "users", &json!({}), &PageOptions::new("Users").fragment_only());
    assert!(result
        .html
        .starts_with("<div class=\"render-error\">Template execution error: "));
}

#[test]
fn test_missing_layout_prefixes_marker_to_content() {
    let project = project();
    let page = project
        .layout_page(project.loader())
        .with_layout("nonexistent.html");

    let result = page.render_page(None, "users", &json!({ "heading": "Users" }), &PageOptions::new("Users"));
    assert_eq!(
        result.html,
        "<div class=\"render-error\">Layout template not found: nonexistent.html</div><h1>Users</h1>"
    );
}

#[test]
fn test_bundled_layout_renders_sidebar_and_assets() {
    let project = TestProject::new().with_page("hello.html", "<p>Hello</p>");
    let page = project.layout_page(project.bundled_loader());

    let options = PageOptions::new("Hello")
        .current_page("users")
        .script("/static/js/app.js")
        .style("/static/css/extra.css");
    let result = page.render_page(None, "hello", &json!({}), &options);

    assert!(result.html.contains("<title>Hello</title>"));
    assert!(result.html.contains("class=\"sidebar\""));
    assert!(result.html.contains("<script src=\"/static/js/app.js\"></script>"));
    assert!(result.html.contains("href=\"/static/css/extra.css\""));
    assert!(result.html.contains("<p>Hello</p>"));
    assert!(!result.html.contains("render-error"));
}

#[test]
fn test_project_page_overrides_bundled_page() {
    let project = TestProject::new().with_page("settings.html", "<p>custom settings</p>");
    let page = project.layout_page(project.bundled_loader());

    let result = page.render_page(
        Some(&htmx_headers() as &dyn HeaderLookup),
        "settings",
        &json!({}),
        &PageOptions::new("Settings"),
    );
    assert_eq!(result.html, "<p>custom settings</p>");
}
