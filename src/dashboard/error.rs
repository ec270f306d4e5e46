// ABOUTME: Error types for the dashboard service
// ABOUTME: Maps fragment and render-task failures onto HTTP 500 responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Fragment template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Failed to encode view data: {0}")]
    Data(#[from] serde_json::Error),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to bind dashboard listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Dashboard server error: {0}")]
    Server(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
