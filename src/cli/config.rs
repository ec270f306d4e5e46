// ABOUTME: Configuration management for panelkit
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::render::{MainLayoutPage, DEFAULT_LAYOUT};
use crate::template::{BundledAssets, TemplateLoader, LAYOUT_DIR, PAGE_DIR};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub users: UsersConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Project directory holding `layouts/` and `pages/` overrides.
    pub root: PathBuf,
    pub layout_dir: String,
    pub page_dir: String,
    pub main_layout: String,
    /// Fall back to the templates compiled into the binary.
    pub embedded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub addr: String,
    /// Artificial latency for the `/api/*` fragments, in milliseconds.
    pub api_delay_ms: u64,
    pub static_dir: Option<PathBuf>,
    pub components_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    pub addr: String,
    pub default_tenant: String,
    pub tenants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("web"),
            layout_dir: LAYOUT_DIR.to_string(),
            page_dir: PAGE_DIR.to_string(),
            main_layout: DEFAULT_LAYOUT.to_string(),
            embedded: true,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8082".to_string(),
            api_delay_ms: 0,
            static_dir: None,
            components_dir: None,
        }
    }
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            default_tenant: "default".to_string(),
            tenants: vec!["default".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl TemplatesConfig {
    pub fn loader(&self) -> TemplateLoader {
        let loader = TemplateLoader::new(&self.root).with_dirs(&self.layout_dir, &self.page_dir);
        if self.embedded {
            loader.with_embedded(Arc::new(BundledAssets::defaults()))
        } else {
            loader
        }
    }

    pub fn layout_page(&self) -> MainLayoutPage {
        MainLayoutPage::new(&self.main_layout, Arc::new(self.loader()))
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            "panelkit.yaml",
            "panelkit.yml",
            ".panelkit.yaml",
            ".panelkit.yml",
        ];

        for path in possible_paths {
            let path = PathBuf::from(path);
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".panelkit").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("panelkit.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("PANELKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PANELKIT_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(root) = std::env::var("PANELKIT_TEMPLATE_ROOT") {
            self.templates.root = PathBuf::from(root);
        }
        if let Ok(addr) = std::env::var("PANELKIT_DASHBOARD_ADDR") {
            self.dashboard.addr = addr;
        }
        if let Ok(addr) = std::env::var("PANELKIT_USERS_ADDR") {
            self.users.addr = addr;
        }
        if let Ok(delay) = std::env::var("PANELKIT_API_DELAY_MS") {
            self.dashboard.api_delay_ms = delay.parse()?;
        }

        Ok(())
    }
}
