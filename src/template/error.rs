// ABOUTME: Error types for template resolution and rendering
// ABOUTME: Separates lookup failures from syntax and execution failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template {name} not found in project or embedded assets (searched: {})", .searched.join(", "))]
    NotFound { name: String, searched: Vec<String> },

    #[error("invalid template name '{0}'")]
    InvalidName(String),

    #[error("template syntax error in {name}: {message}")]
    Syntax { name: String, message: String },

    #[error("template execution error in {name}: {message}")]
    Render { name: String, message: String },

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TemplateError::NotFound { .. })
    }

    /// Underlying message without the template-name prefix.
    pub fn detail(&self) -> String {
        match self {
            TemplateError::Syntax { message, .. } | TemplateError::Render { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
