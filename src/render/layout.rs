// ABOUTME: Page renderer composing page content into the main layout and sidebar
// ABOUTME: Chooses full-document or fragment output and degrades failures to inline markers

use handlebars::html_escape;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use super::options::PageOptions;
use super::page::PageContent;
use super::request::{is_partial_request, HeaderLookup};
use crate::template::{Template, TemplateError, TemplateLoader};

pub const DEFAULT_LAYOUT: &str = "base.html";
pub const SIDEBAR_TEMPLATE: &str = "sidebar.html";
pub const SIDEBAR_PARTIAL: &str = "sidebar";

const PAGE_EXTENSION: &str = ".html";

/// Data handed to the layout template.
#[derive(Debug, Serialize)]
struct LayoutData<'a> {
    title: &'a str,
    description: &'a str,
    current_page: &'a str,
    meta_tags: &'a BTreeMap<String, String>,
    sidebar_data: &'a JsonValue,
    scripts: &'a [String],
    styles: &'a [String],
    custom_css: &'a str,
    content: &'a str,
}

/// A layout name bound to a template loader.
///
/// Immutable once built; use [`MainLayoutPage::with_layout`] for a copy bound
/// to another layout, or [`PageOptions::layout`] for a one-off override.
#[derive(Debug, Clone)]
pub struct MainLayoutPage {
    layout: String,
    loader: Arc<TemplateLoader>,
}

impl MainLayoutPage {
    pub fn new(layout: impl Into<String>, loader: Arc<TemplateLoader>) -> Self {
        Self {
            layout: layout.into(),
            loader,
        }
    }

    /// Layout bound to a project-only loader rooted at `root`.
    pub fn in_dir(layout: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self::new(layout, Arc::new(TemplateLoader::new(root)))
    }

    pub fn layout_name(&self) -> &str {
        &self.layout
    }

    pub fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    pub fn with_layout(&self, layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            loader: Arc::clone(&self.loader),
        }
    }

    /// Render `template_name` as a full document or a content fragment.
    ///
    /// Never fails: template problems come back as visible error markers in
    /// the returned HTML.
    pub fn render_page<T: Serialize>(
        &self,
        headers: Option<&dyn HeaderLookup>,
        template_name: &str,
        data: &T,
        options: &PageOptions,
    ) -> PageContent {
        let partial_request = headers.map(is_partial_request).unwrap_or(false);
        let fragment = options.control.mode.wants_fragment(partial_request);

        let page_name = page_file_name(template_name);
        let content = self.render_content(&page_name, data);

        let html = if fragment {
            debug!(page = %page_name, partial_request, "Rendering content fragment");
            content
        } else {
            let layout_name = options
                .control
                .layout_override
                .as_deref()
                .unwrap_or(&self.layout);
            debug!(page = %page_name, layout = %layout_name, "Rendering full document");
            self.render_layout(layout_name, options, content)
        };

        PageContent::from_options(html, options)
    }

    fn render_content<T: Serialize>(&self, page_name: &str, data: &T) -> String {
        let template = match self.loader.load(page_name) {
            Ok(template) => template,
            Err(e) if e.is_not_found() => {
                return error_marker("Template not found", page_name);
            }
            Err(e) => {
                warn!("Failed to load page template {}: {}", page_name, e);
                return error_marker("Template error", &e.detail());
            }
        };

        template.render(data).unwrap_or_else(|e| {
            warn!("Failed to execute page template {}: {}", page_name, e);
            error_marker("Template execution error", &e.detail())
        })
    }

    fn render_layout(&self, layout_name: &str, options: &PageOptions, content: String) -> String {
        let layout = match self.loader.load(layout_name) {
            Ok(layout) => layout,
            Err(e) if e.is_not_found() => {
                return error_marker("Layout template not found", layout_name) + &content;
            }
            Err(e) => {
                warn!("Failed to load layout {}: {}", layout_name, e);
                return error_marker("Layout template error", &e.detail()) + &content;
            }
        };

        let layout = match self.attach_sidebar(layout) {
            Ok(layout) => layout,
            Err(e) => {
                warn!("Failed to attach sidebar to layout {}: {}", layout_name, e);
                return error_marker("Layout template error", &e.detail()) + &content;
            }
        };

        let data = LayoutData {
            title: &options.title,
            description: &options.description,
            current_page: &options.current_page,
            meta_tags: &options.meta_tags,
            sidebar_data: &options.sidebar_data,
            scripts: &options.scripts,
            styles: &options.styles,
            custom_css: &options.custom_css,
            content: &content,
        };

        match layout.render(&data) {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to execute layout {}: {}", layout_name, e);
                error_marker("Layout execution error", &e.detail()) + &content
            }
        }
    }

    /// Attach the sidebar partial when one resolves. A missing sidebar only
    /// matters if the layout actually calls it.
    fn attach_sidebar(&self, layout: Template) -> Result<Template, TemplateError> {
        match self.loader.load(SIDEBAR_TEMPLATE) {
            Ok(sidebar) => layout.with_partial(SIDEBAR_PARTIAL, &sidebar),
            Err(e) if e.is_not_found() => {
                debug!("No sidebar partial available for layout {}", layout.name());
                Ok(layout)
            }
            Err(e) => Err(e),
        }
    }
}

/// `users` -> `users.html`; names already carrying the extension are kept.
pub fn page_file_name(template_name: &str) -> String {
    if template_name.ends_with(PAGE_EXTENSION) {
        template_name.to_string()
    } else {
        format!("{}{}", template_name, PAGE_EXTENSION)
    }
}

fn error_marker(label: &str, detail: &str) -> String {
    format!(
        "<div class=\"render-error\">{}: {}</div>",
        label,
        html_escape(detail)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MemoryAssets;
    use serde_json::json;
    use std::collections::HashMap;

    fn page_with(files: &[(&str, &str)]) -> MainLayoutPage {
        let assets = MemoryAssets::with_files(files.iter().copied());
        let loader = TemplateLoader::new("/nonexistent-project-root").with_embedded(Arc::new(assets));
        MainLayoutPage::new(DEFAULT_LAYOUT, Arc::new(loader))
    }

    #[test]
    fn test_page_file_name() {
        assert_eq!(page_file_name("users"), "users.html");
        assert_eq!(page_file_name("users.html"), "users.html");
    }

    #[test]
    fn test_error_marker_escapes_detail() {
        assert_eq!(
            error_marker("Template not found", "<x>.html"),
            "<div class=\"render-error\">Template not found: &lt;x&gt;.html</div>"
        );
    }

    #[test]
    fn test_with_layout_keeps_loader() {
        let page = page_with(&[]);
        let other = page.with_layout("minimal.html");
        assert_eq!(page.layout_name(), DEFAULT_LAYOUT);
        assert_eq!(other.layout_name(), "minimal.html");
        assert!(other.loader().has_embedded());
    }

    #[test]
    fn test_layout_without_sidebar_still_renders() {
        let page = page_with(&[
            ("layouts/base.html", "<body>{{{content}}}</body>"),
            ("pages/home.html", "<h1>{{heading}}</h1>"),
        ]);
        let result = page.render_page(
            None,
            "home",
            &json!({ "heading": "Hi" }),
            &PageOptions::new("Home"),
        );
        assert_eq!(result.html, "<body><h1>Hi</h1></body>");
    }

    #[test]
    fn test_layout_calling_missing_sidebar_keeps_content() {
        let page = page_with(&[
            ("layouts/base.html", "<body>{{> sidebar}}{{{content}}}</body>"),
            ("pages/home.html", "<h1>Home</h1>"),
        ]);
        let result = page.render_page(None, "home", &json!({}), &PageOptions::new("Home"));
        assert!(result.html.starts_with("<div class=\"render-error\">Layout execution error: "));
        assert!(result.html.ends_with("<h1>Home</h1>"));
    }

    #[test]
    fn test_partial_header_yields_fragment() {
        let page = page_with(&[
            ("layouts/base.html", "<body>{{{content}}}</body>"),
            ("pages/home.html", "<h1>Home</h1>"),
        ]);
        let mut headers = HashMap::new();
        headers.insert("HX-Request".to_string(), "true".to_string());

        let result = page.render_page(
            Some(&headers),
            "home",
            &json!({}),
            &PageOptions::new("Home"),
        );
        assert_eq!(result.html, "<h1>Home</h1>");
    }
}
