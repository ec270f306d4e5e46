// ABOUTME: Embedded fallback template sources consulted after project directories
// ABOUTME: Provides the compiled-in default bundle and an in-memory source for tests

use include_dir::{include_dir, Dir};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Default templates shipped inside the binary.
static DEFAULT_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Read-only source of template text keyed by relative path.
///
/// Implementations are consulted only after every project directory probe
/// has missed, so they act as safe defaults that a deployment can override.
pub trait EmbeddedAssets: Send + Sync {
    /// Return the file's text, or `None` if the bundle has no such entry.
    fn read(&self, path: &Path) -> Option<String>;
}

/// Assets compiled into the binary with `include_dir`.
#[derive(Debug, Clone, Copy)]
pub struct BundledAssets {
    dir: &'static Dir<'static>,
}

impl BundledAssets {
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// The default layouts, pages, and partials shipped with panelkit.
    pub fn defaults() -> Self {
        Self::new(&DEFAULT_TEMPLATES)
    }
}

impl EmbeddedAssets for BundledAssets {
    fn read(&self, path: &Path) -> Option<String> {
        self.dir
            .get_file(normalize(path))
            .and_then(|file| file.contents_utf8())
            .map(str::to_string)
    }
}

/// Assets held in memory.
///
/// Useful for testing and for applications that assemble their defaults at
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<PathBuf, String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> &mut Self {
        self.files.insert(normalize(path.as_ref()), content.into());
        self
    }

    pub fn with_files(
        files: impl IntoIterator<Item = (impl AsRef<Path>, impl Into<String>)>,
    ) -> Self {
        let mut assets = Self::new();
        for (path, content) in files {
            assets.add(path, content);
        }
        assets
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl EmbeddedAssets for MemoryAssets {
    fn read(&self, path: &Path) -> Option<String> {
        self.files.get(&normalize(path)).cloned()
    }
}

/// Strip `.` and root components so `./layouts/x` and `layouts/x` share a key.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
