// ABOUTME: Router construction and server loop for the admin dashboard
// ABOUTME: Wires page and fragment handlers, static directories, and request tracing

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::error::{DashboardError, Result};
use super::handlers::{self, DashboardState, SharedState};
use crate::cli::config::{DashboardConfig, TemplatesConfig};

/// Build the dashboard router, mounting the configured static directories.
pub fn build_router(state: SharedState, config: &DashboardConfig) -> Router {
    let router = Router::new()
        .route("/", get(handlers::dashboard))
        .route("/users", get(handlers::users))
        .route("/analytics", get(handlers::analytics))
        .route("/projects", get(handlers::projects))
        .route("/settings", get(handlers::settings))
        .route("/api/users", get(handlers::api_users))
        .route("/api/activity", get(handlers::api_activity))
        .fallback(not_found)
        .with_state(state);

    let router = with_static(router, "/static", config.static_dir.as_deref());
    with_static(router, "/components", config.components_dir.as_deref())
        .layer(TraceLayer::new_for_http())
}

/// Mount `dir` under `prefix` when configured.
fn with_static(router: Router, prefix: &str, dir: Option<&Path>) -> Router {
    match dir {
        Some(dir) => {
            info!(prefix, dir = %dir.display(), "Serving static directory");
            router.nest_service(prefix, ServeDir::new(dir))
        }
        None => router,
    }
}

/// Full dashboard application for the given configuration.
pub fn app(templates: &TemplatesConfig, config: &DashboardConfig) -> Router {
    let state = DashboardState::new(templates.layout_page())
        .with_api_delay(Duration::from_millis(config.api_delay_ms));
    build_router(Arc::new(state), config)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Run the dashboard server until ctrl-c.
pub async fn serve(templates: &TemplatesConfig, config: &DashboardConfig) -> Result<()> {
    let router = app(templates, config);

    let listener = TcpListener::bind(&config.addr)
        .await
        .map_err(|source| DashboardError::Bind {
            addr: config.addr.clone(),
            source,
        })?;
    info!(addr = %config.addr, "Dashboard server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(DashboardError::Server)?;

    info!("Dashboard server stopped");
    Ok(())
}

pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
