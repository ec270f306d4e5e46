// ABOUTME: Rendered-output envelope returned for each page render
// ABOUTME: Carries the final HTML plus the page metadata echoed from the options

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use super::options::PageOptions;

/// The complete answer for one request render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContent {
    pub html: String,
    pub title: String,
    pub description: String,
    pub meta_tags: BTreeMap<String, String>,
    /// Used for navigation highlighting.
    pub current_page: String,
    pub sidebar_data: JsonValue,
}

impl PageContent {
    pub(crate) fn from_options(html: String, options: &PageOptions) -> Self {
        Self {
            html,
            title: options.title.clone(),
            description: options.description.clone(),
            meta_tags: options.meta_tags.clone(),
            current_page: options.current_page.clone(),
            sidebar_data: options.sidebar_data.clone(),
        }
    }

    pub fn into_html(self) -> String {
        self.html
    }
}
