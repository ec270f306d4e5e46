// ABOUTME: HTTP handlers for the admin dashboard pages and HTMX fragments
// ABOUTME: Pages go through the layout renderer, /api fragments load templates directly

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::error::Result;
use super::models::{Activity, Dashboard, UserRow};
use crate::render::{MainLayoutPage, PageOptions};

pub const USERS_TABLE_TEMPLATE: &str = "users-table.html";
pub const ACTIVITY_TEMPLATE: &str = "activity.html";

const APP_STYLES: &str = "/static/css/dashboard.css";
const COMPONENTS_SCRIPT: &str = "/components/register-all.js";

/// State shared by every dashboard handler.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pages: MainLayoutPage,
    api_delay: Duration,
}

pub type SharedState = Arc<DashboardState>;

impl DashboardState {
    pub fn new(pages: MainLayoutPage) -> Self {
        Self {
            pages,
            api_delay: Duration::ZERO,
        }
    }

    pub fn with_api_delay(mut self, delay: Duration) -> Self {
        self.api_delay = delay;
        self
    }

    pub fn pages(&self) -> &MainLayoutPage {
        &self.pages
    }

    /// Render a page through the layout on the blocking pool; template
    /// resolution reads the filesystem on every call.
    async fn page(
        &self,
        headers: HeaderMap,
        name: &'static str,
        data: &impl Serialize,
        options: PageOptions,
    ) -> Result<Html<String>> {
        let data = serde_json::to_value(data)?;
        let pages = self.pages.clone();
        let content = tokio::task::spawn_blocking(move || {
            pages.render_page(Some(&headers), name, &data, &options)
        })
        .await?;
        Ok(Html(content.into_html()))
    }

    /// Render a root-level fragment template after the configured delay.
    async fn fragment(&self, name: &'static str, data: &impl Serialize) -> Result<Html<String>> {
        if !self.api_delay.is_zero() {
            debug!(fragment = name, delay_ms = self.api_delay.as_millis() as u64, "Delaying fragment");
            tokio::time::sleep(self.api_delay).await;
        }
        let data = serde_json::to_value(data)?;
        let pages = self.pages.clone();
        let html = tokio::task::spawn_blocking(move || pages.loader().load(name)?.render(&data))
            .await??;
        Ok(Html(html))
    }
}

fn page_options(title: &str, current_page: &str) -> PageOptions {
    PageOptions::new(title)
        .current_page(current_page)
        .style(APP_STYLES)
        .script(COMPONENTS_SCRIPT)
        .sidebar_data(json!({ "app_name": "Panelkit" }))
}

pub async fn dashboard(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Html<String>> {
    let data = Dashboard::sample(Utc::now());
    let options = page_options("Dashboard", "dashboard")
        .description("Admin dashboard overview")
        .meta_tag("keywords", "admin, dashboard");
    state.page(headers, "dashboard", &data, options).await
}

pub async fn users(State(state): State<SharedState>, headers: HeaderMap) -> Result<Html<String>> {
    state
        .page(headers, "users", &json!({}), page_options("Users", "users"))
        .await
}

pub async fn analytics(State(state): State<SharedState>, headers: HeaderMap) -> Result<Html<String>> {
    state
        .page(headers, "analytics", &json!({}), page_options("Analytics", "analytics"))
        .await
}

pub async fn projects(State(state): State<SharedState>, headers: HeaderMap) -> Result<Html<String>> {
    state
        .page(headers, "projects", &json!({}), page_options("Projects", "projects"))
        .await
}

pub async fn settings(State(state): State<SharedState>, headers: HeaderMap) -> Result<Html<String>> {
    state
        .page(headers, "settings", &json!({}), page_options("Settings", "settings"))
        .await
}

pub async fn api_users(State(state): State<SharedState>) -> Result<Html<String>> {
    state
        .fragment(USERS_TABLE_TEMPLATE, &json!({ "users": UserRow::sample() }))
        .await
}

pub async fn api_activity(State(state): State<SharedState>) -> Result<Html<String>> {
    state
        .fragment(ACTIVITY_TEMPLATE, &json!({ "activities": Activity::recent(Utc::now()) }))
        .await
}
