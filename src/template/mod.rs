// ABOUTME: Template resolution module for panelkit
// ABOUTME: Locates templates in project directories or embedded assets and parses them

pub mod assets;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod loader;

pub use assets::{BundledAssets, EmbeddedAssets, MemoryAssets};
pub use engine::{validate_template, Template, TemplateOrigin};
pub use error::{Result, TemplateError};
pub use loader::{Candidate, TemplateLoader, LAYOUT_DIR, PAGE_DIR};
