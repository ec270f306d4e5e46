// ABOUTME: Admin dashboard service for panelkit
// ABOUTME: Serves layout-wrapped pages and HTMX fragments over axum

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

pub use error::{DashboardError, Result};
pub use handlers::{DashboardState, SharedState, ACTIVITY_TEMPLATE, USERS_TABLE_TEMPLATE};
pub use models::{Activity, BreadcrumbItem, Dashboard, DashboardUser, Stat, Trend, UserRow};
pub use routes::{app, build_router, serve};
