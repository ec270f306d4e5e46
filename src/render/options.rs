// ABOUTME: Render-time options for a single page render
// ABOUTME: Keeps display meta tags apart from the flags that steer rendering

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Legacy meta-tag key: `"false"` forces fragment output, `"true"` forces
/// the full document.
pub const FULL_LAYOUT_KEY: &str = "full_layout";

/// Legacy meta-tag key: overrides the layout for one render.
pub const MAIN_LAYOUT_KEY: &str = "main_layout";

/// How much of the document a render produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Fragment for partial-update requests, full document otherwise.
    #[default]
    Auto,
    Full,
    Fragment,
}

impl LayoutMode {
    /// Resolve against whether the request asked for a partial update.
    pub fn wants_fragment(self, partial_request: bool) -> bool {
        match self {
            LayoutMode::Auto => partial_request,
            LayoutMode::Full => false,
            LayoutMode::Fragment => true,
        }
    }
}

/// Behavioral switches for one render, kept apart from display meta tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderControl {
    pub mode: LayoutMode,
    pub layout_override: Option<String>,
}

impl RenderControl {
    /// Extract control flags from a string-keyed meta-tag map.
    pub fn from_meta_tags(tags: &BTreeMap<String, String>) -> Self {
        let mut control = Self::default();
        for (key, value) in tags {
            control.apply(key, value);
        }
        control
    }

    /// Apply a reserved key. Returns false for keys that are not reserved.
    pub fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            FULL_LAYOUT_KEY => {
                match value {
                    "false" => self.mode = LayoutMode::Fragment,
                    "true" => self.mode = LayoutMode::Full,
                    _ => {}
                }
                true
            }
            MAIN_LAYOUT_KEY => {
                if !value.is_empty() {
                    self.layout_override = Some(value.to_string());
                }
                true
            }
            _ => false,
        }
    }

    pub fn is_reserved(key: &str) -> bool {
        key == FULL_LAYOUT_KEY || key == MAIN_LAYOUT_KEY
    }
}

/// Caller-supplied configuration for one `render_page` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageOptions {
    pub title: String,
    pub description: String,
    pub current_page: String,
    pub scripts: Vec<String>,
    pub styles: Vec<String>,
    pub custom_css: String,
    /// Display-only meta tags rendered into the document head.
    pub meta_tags: BTreeMap<String, String>,
    pub sidebar_data: JsonValue,
    #[serde(skip)]
    pub control: RenderControl,
}

impl PageOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn current_page(mut self, page: impl Into<String>) -> Self {
        self.current_page = page.into();
        self
    }

    pub fn script(mut self, src: impl Into<String>) -> Self {
        self.scripts.push(src.into());
        self
    }

    pub fn style(mut self, href: impl Into<String>) -> Self {
        self.styles.push(href.into());
        self
    }

    pub fn custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = css.into();
        self
    }

    /// Add a meta tag. The reserved keys `full_layout` and `main_layout`
    /// are routed into [`RenderControl`] instead of the display tags.
    pub fn meta_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if !self.control.apply(&name, &value) {
            self.meta_tags.insert(name, value);
        }
        self
    }

    pub fn sidebar_data(mut self, data: JsonValue) -> Self {
        self.sidebar_data = data;
        self
    }

    /// Render only the page content, whatever the request says.
    pub fn fragment_only(mut self) -> Self {
        self.control.mode = LayoutMode::Fragment;
        self
    }

    /// Render the full document even for partial-update requests.
    pub fn full_document(mut self) -> Self {
        self.control.mode = LayoutMode::Full;
        self
    }

    /// Use `layout` instead of the bound layout for this render.
    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        let layout = layout.into();
        if !layout.is_empty() {
            self.control.layout_override = Some(layout);
        }
        self
    }
}
