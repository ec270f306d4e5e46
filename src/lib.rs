// ABOUTME: Main library module for panelkit
// ABOUTME: Exports the template resolver, page renderer, and the two HTTP services

pub mod cli;
pub mod dashboard;
pub mod render;
pub mod template;
pub mod users;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use render::{MainLayoutPage, PageContent, PageOptions};
pub use template::{Template, TemplateError, TemplateLoader};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
