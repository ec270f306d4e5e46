// ABOUTME: Resolves logical template names through project directories and embedded fallbacks
// ABOUTME: First match wins; every load re-probes storage and re-parses the template text

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use super::assets::EmbeddedAssets;
use super::engine::{Template, TemplateOrigin};
use super::error::{Result, TemplateError};

pub const LAYOUT_DIR: &str = "layouts";
pub const PAGE_DIR: &str = "pages";

/// One location probed while resolving a template name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    ProjectLayout(PathBuf),
    ProjectPage(PathBuf),
    EmbeddedLayout(PathBuf),
    EmbeddedPage(PathBuf),
    EmbeddedRoot(PathBuf),
}

impl Candidate {
    fn origin(&self) -> TemplateOrigin {
        match self {
            Candidate::ProjectLayout(p) => TemplateOrigin::ProjectLayout(p.clone()),
            Candidate::ProjectPage(p) => TemplateOrigin::ProjectPage(p.clone()),
            Candidate::EmbeddedLayout(p) => TemplateOrigin::EmbeddedLayout(p.clone()),
            Candidate::EmbeddedPage(p) => TemplateOrigin::EmbeddedPage(p.clone()),
            Candidate::EmbeddedRoot(p) => TemplateOrigin::EmbeddedRoot(p.clone()),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::ProjectLayout(p) | Candidate::ProjectPage(p) => {
                write!(f, "{}", p.display())
            }
            Candidate::EmbeddedLayout(p) | Candidate::EmbeddedPage(p) | Candidate::EmbeddedRoot(p) => {
                write!(f, "embedded:{}", p.display())
            }
        }
    }
}

/// Loads templates for one project root, falling back to embedded assets.
///
/// Resolution order for a name:
/// 1. `<root>/<layout_dir>/<name>`
/// 2. `<root>/<page_dir>/<name>`
/// 3. `<layout_dir>/<name>` in the embedded assets
/// 4. `<page_dir>/<name>` in the embedded assets
/// 5. `<name>` at the embedded root
///
/// Nothing is cached: a file edited between two requests is picked up by the
/// second one.
#[derive(Clone)]
pub struct TemplateLoader {
    root: PathBuf,
    layout_dir: PathBuf,
    page_dir: PathBuf,
    embedded: Option<Arc<dyn EmbeddedAssets>>,
}

impl fmt::Debug for TemplateLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateLoader")
            .field("root", &self.root)
            .field("layout_dir", &self.layout_dir)
            .field("page_dir", &self.page_dir)
            .field("embedded", &self.embedded.is_some())
            .finish()
    }
}

impl TemplateLoader {
    /// Project-only loader using `<root>/layouts` and `<root>/pages`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout_dir: PathBuf::from(LAYOUT_DIR),
            page_dir: PathBuf::from(PAGE_DIR),
            embedded: None,
        }
    }

    /// Attach an embedded fallback consulted when project files are absent.
    pub fn with_embedded(mut self, assets: Arc<dyn EmbeddedAssets>) -> Self {
        self.embedded = Some(assets);
        self
    }

    /// Use different sub-directory names for layouts and pages.
    pub fn with_dirs(mut self, layout_dir: impl Into<PathBuf>, page_dir: impl Into<PathBuf>) -> Self {
        self.layout_dir = layout_dir.into();
        self.page_dir = page_dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project layout directory on the local filesystem.
    pub fn layout_dir(&self) -> PathBuf {
        self.root.join(&self.layout_dir)
    }

    /// Project page directory on the local filesystem.
    pub fn page_dir(&self) -> PathBuf {
        self.root.join(&self.page_dir)
    }

    pub fn has_embedded(&self) -> bool {
        self.embedded.is_some()
    }

    /// Every location `load` would probe for `name`, in order.
    pub fn candidates(&self, name: &str) -> Vec<Candidate> {
        let mut candidates = vec![
            Candidate::ProjectLayout(self.layout_dir().join(name)),
            Candidate::ProjectPage(self.page_dir().join(name)),
        ];
        if self.embedded.is_some() {
            candidates.push(Candidate::EmbeddedLayout(self.layout_dir.join(name)));
            candidates.push(Candidate::EmbeddedPage(self.page_dir.join(name)));
            candidates.push(Candidate::EmbeddedRoot(PathBuf::from(name)));
        }
        candidates
    }

    /// Resolve `name` and parse the first matching file.
    ///
    /// A parse failure in the matching file is returned as is; later
    /// candidates are not tried.
    pub fn load(&self, name: &str) -> Result<Template> {
        validate_name(name)?;

        let candidates = self.candidates(name);
        for candidate in &candidates {
            debug!("Trying template candidate: {}", candidate);
            if let Some(source) = self.probe(candidate)? {
                debug!("Found template {} at {}", name, candidate);
                return Template::parse(name, &source, candidate.origin());
            }
        }

        warn!("Template {} not found in project or embedded assets", name);
        Err(TemplateError::NotFound {
            name: name.to_string(),
            searched: candidates.iter().map(|c| c.to_string()).collect(),
        })
    }

    fn probe(&self, candidate: &Candidate) -> Result<Option<String>> {
        match candidate {
            Candidate::ProjectLayout(path) | Candidate::ProjectPage(path) => {
                if !path.is_file() {
                    return Ok(None);
                }
                std::fs::read_to_string(path)
                    .map(Some)
                    .map_err(|source| TemplateError::Read {
                        path: path.clone(),
                        source,
                    })
            }
            Candidate::EmbeddedLayout(path)
            | Candidate::EmbeddedPage(path)
            | Candidate::EmbeddedRoot(path) => {
                Ok(self.embedded.as_ref().and_then(|assets| assets.read(path)))
            }
        }
    }
}

/// Reject names that could escape the template directories.
fn validate_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if name.trim().is_empty() || escapes {
        return Err(TemplateError::InvalidName(name.to_string()));
    }
    Ok(())
}
