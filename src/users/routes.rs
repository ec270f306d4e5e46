// ABOUTME: Router construction and server loop for the user-management API
// ABOUTME: Mounts the CRUD, admin, and health endpoints over an in-memory repository

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{self, UserService, UsersApp};
use super::repository::{MemoryUserRepository, UserRepository};
use crate::cli::config::UsersConfig;

pub fn build_router(app: UsersApp) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/v1/users",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route(
            "/api/v1/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/api/v1/users/by-name/{username}",
            get(handlers::get_user_by_name),
        )
        .route("/api/v1/admin/users/stats", get(handlers::user_stats))
        .route(
            "/api/v1/admin/users/{id}/activate",
            post(handlers::activate_user),
        )
        .route(
            "/api/v1/admin/users/{id}/deactivate",
            post(handlers::deactivate_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Application over a fresh in-memory repository for the configured tenants.
pub fn app(config: &UsersConfig) -> Router {
    let mut tenants = config.tenants.clone();
    if !tenants.contains(&config.default_tenant) {
        tenants.push(config.default_tenant.clone());
    }

    let repo: Arc<dyn UserRepository> = Arc::new(MemoryUserRepository::new(tenants));
    build_router(UsersApp::new(UserService::new(repo, &config.default_tenant)))
}

/// Run the user-management server until ctrl-c.
pub async fn serve(config: &UsersConfig) -> anyhow::Result<()> {
    let router = app(config);

    let listener = TcpListener::bind(&config.addr).await?;
    info!(addr = %config.addr, tenant = %config.default_tenant, "User management server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(crate::dashboard::routes::shutdown_signal())
        .await?;

    info!("User management server stopped");
    Ok(())
}
