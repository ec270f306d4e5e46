// ABOUTME: Parsed template wrapper backed by a per-template Handlebars registry
// ABOUTME: Records where a template came from and renders it with strict data binding

use handlebars::Handlebars;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::{Result, TemplateError};
use super::helpers;

/// Where a resolved template was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    ProjectLayout(PathBuf),
    ProjectPage(PathBuf),
    EmbeddedLayout(PathBuf),
    EmbeddedPage(PathBuf),
    EmbeddedRoot(PathBuf),
    Inline,
}

impl TemplateOrigin {
    pub fn is_embedded(&self) -> bool {
        matches!(
            self,
            TemplateOrigin::EmbeddedLayout(_)
                | TemplateOrigin::EmbeddedPage(_)
                | TemplateOrigin::EmbeddedRoot(_)
        )
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            TemplateOrigin::ProjectLayout(p)
            | TemplateOrigin::ProjectPage(p)
            | TemplateOrigin::EmbeddedLayout(p)
            | TemplateOrigin::EmbeddedPage(p)
            | TemplateOrigin::EmbeddedRoot(p) => Some(p),
            TemplateOrigin::Inline => None,
        }
    }
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateOrigin::ProjectLayout(p) => write!(f, "project layout {}", p.display()),
            TemplateOrigin::ProjectPage(p) => write!(f, "project page {}", p.display()),
            TemplateOrigin::EmbeddedLayout(p) => write!(f, "embedded layout {}", p.display()),
            TemplateOrigin::EmbeddedPage(p) => write!(f, "embedded page {}", p.display()),
            TemplateOrigin::EmbeddedRoot(p) => write!(f, "embedded root {}", p.display()),
            TemplateOrigin::Inline => write!(f, "inline"),
        }
    }
}

/// A single parsed, executable template.
///
/// Each template owns its own registry so partials attached for one render
/// never leak into another.
#[derive(Clone)]
pub struct Template {
    name: String,
    source: String,
    origin: TemplateOrigin,
    registry: Handlebars<'static>,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .finish()
    }
}

impl Template {
    /// Parse template text. Syntax errors are reported, never swallowed.
    pub fn parse(name: &str, source: &str, origin: TemplateOrigin) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.set_dev_mode(false);
        helpers::register_helpers(&mut registry);

        registry
            .register_template_string(name, source)
            .map_err(|e| TemplateError::Syntax {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            source: source.to_string(),
            origin,
            registry,
        })
    }

    /// Parse template text that does not come from the loader.
    pub fn inline(name: &str, source: &str) -> Result<Self> {
        Self::parse(name, source, TemplateOrigin::Inline)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &TemplateOrigin {
        &self.origin
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Make `partial` callable from this template as `{{> alias}}`.
    pub fn with_partial(mut self, alias: &str, partial: &Template) -> Result<Self> {
        self.registry
            .register_partial(alias, partial.source())
            .map_err(|e| TemplateError::Syntax {
                name: partial.name().to_string(),
                message: e.to_string(),
            })?;
        Ok(self)
    }

    pub fn has_partial(&self, alias: &str) -> bool {
        self.registry.get_template(alias).is_some()
    }

    /// Execute the template against `data`.
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        self.registry
            .render(&self.name, data)
            .map_err(|e| TemplateError::Render {
                name: self.name.clone(),
                message: e.to_string(),
            })
    }
}

/// Validate template syntax without keeping the result
pub fn validate_template(source: &str) -> Result<()> {
    handlebars::Template::compile(source)
        .map(|_| ())
        .map_err(|e| TemplateError::Syntax {
            name: "<inline>".to_string(),
            message: e.to_string(),
        })
}
