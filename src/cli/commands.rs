// ABOUTME: Command implementations for the panelkit CLI
// ABOUTME: Handles the dashboard, users, render, and resolve commands

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::{debug, info};

use super::args::Args;
use super::config::{DashboardConfig, TemplatesConfig, UsersConfig};
use crate::render::{PageOptions, HX_REQUEST};
use crate::template::TemplateError;

/// Serve the admin dashboard until interrupted
pub async fn serve_dashboard(templates: &TemplatesConfig, config: &DashboardConfig) -> Result<()> {
    info!(
        "Starting dashboard with templates from {}",
        templates.root.display()
    );
    crate::dashboard::serve(templates, config)
        .await
        .map_err(|e| anyhow::anyhow!("Dashboard server failed: {}", e))
}

/// Serve the user-management API until interrupted
pub async fn serve_users(config: &UsersConfig) -> Result<()> {
    crate::users::serve(config)
        .await
        .context("User management server failed")
}

/// What the `render` command should produce.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub page: String,
    pub partial: bool,
    pub layout: Option<String>,
    pub title: String,
    pub data: Option<String>,
    pub meta: Vec<String>,
}

/// Render one page the way the dashboard would answer a request
pub fn render_page(templates: &TemplatesConfig, request: &RenderRequest) -> Result<String> {
    let data: JsonValue = match &request.data {
        Some(raw) => serde_json::from_str(raw).context("Invalid --data JSON")?,
        None => JsonValue::Object(Default::default()),
    };

    let mut options = PageOptions::new(request.title.clone()).current_page(request.page.clone());
    for (key, value) in Args::parse_pairs(&request.meta)? {
        options = options.meta_tag(key, value);
    }
    if let Some(layout) = &request.layout {
        options = options.layout(layout.clone());
    }

    let mut headers = HashMap::new();
    if request.partial {
        headers.insert(HX_REQUEST.to_string(), "true".to_string());
    }

    debug!(page = %request.page, partial = request.partial, "Rendering from command line");
    let content = templates
        .layout_page()
        .render_page(Some(&headers), &request.page, &data, &options);
    Ok(content.into_html())
}

/// Describe where `name` resolves, or list every location probed
pub fn resolve_template(templates: &TemplatesConfig, name: &str) -> Result<String> {
    let loader = templates.loader();
    match loader.load(name) {
        Ok(template) => Ok(format!("{} -> {}", name, template.origin())),
        Err(TemplateError::NotFound { name, searched }) => {
            let searched: Vec<String> = searched
                .iter()
                .map(|location| format!("  {}", location))
                .collect();
            Err(anyhow::anyhow!(
                "template {} not found\nSearched:\n{}",
                name,
                searched.join("\n")
            ))
        }
        Err(e) => Err(e.into()),
    }
}
