// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Builds temporary template projects and loaders over them

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use panelkit::render::{MainLayoutPage, DEFAULT_LAYOUT};
use panelkit::template::{BundledAssets, MemoryAssets, TemplateLoader};

/// A temporary project directory with `layouts/` and `pages/` sub-directories.
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(temp_dir.path().join("layouts")).expect("Failed to create layouts dir");
        fs::create_dir_all(temp_dir.path().join("pages")).expect("Failed to create pages dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_layout(self, name: &str, content: &str) -> Self {
        self.write_layout(name, content);
        self
    }

    pub fn with_page(self, name: &str, content: &str) -> Self {
        self.write_page(name, content);
        self
    }

    pub fn write_layout(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join("layouts").join(name);
        fs::write(&path, content).expect("Failed to write layout");
        path
    }

    pub fn write_page(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join("pages").join(name);
        fs::write(&path, content).expect("Failed to write page");
        path
    }

    /// Loader over this project only.
    pub fn loader(&self) -> TemplateLoader {
        TemplateLoader::new(self.path())
    }

    /// Loader over this project with the bundled templates as fallback.
    pub fn bundled_loader(&self) -> TemplateLoader {
        self.loader().with_embedded(Arc::new(BundledAssets::defaults()))
    }

    /// Loader over this project with the given in-memory fallback files.
    pub fn memory_loader(&self, files: &[(&str, &str)]) -> TemplateLoader {
        let assets = MemoryAssets::with_files(files.iter().copied());
        self.loader().with_embedded(Arc::new(assets))
    }

    pub fn layout_page(&self, loader: TemplateLoader) -> MainLayoutPage {
        MainLayoutPage::new(DEFAULT_LAYOUT, Arc::new(loader))
    }
}

/// Minimal layout exercising every layout field.
pub const SIMPLE_LAYOUT: &str = "<html><head><title>{{title}}</title></head>\
<body data-page=\"{{current_page}}\">{{{content}}}</body></html>";
