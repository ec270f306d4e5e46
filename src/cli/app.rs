// ABOUTME: Main application orchestration for panelkit CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands::{self, RenderRequest};
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Logs go to stderr so `render` and `resolve` output stays pipeable.
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(root) = &args.templates {
            self.config.templates.root = root.clone();
        }

        match &args.command {
            Commands::Dashboard {
                addr,
                api_delay_ms,
                static_dir,
                components_dir,
            } => {
                let dashboard = &mut self.config.dashboard;
                if let Some(addr) = addr {
                    dashboard.addr = addr.clone();
                }
                if let Some(delay) = api_delay_ms {
                    dashboard.api_delay_ms = *delay;
                }
                if static_dir.is_some() {
                    dashboard.static_dir = static_dir.clone();
                }
                if components_dir.is_some() {
                    dashboard.components_dir = components_dir.clone();
                }
            }
            Commands::Users { addr, tenant } => {
                if let Some(addr) = addr {
                    self.config.users.addr = addr.clone();
                }
                if let Some(tenant) = tenant {
                    self.config.users.default_tenant = tenant.clone();
                }
            }
            _ => {}
        }
    }

    /// Run the application with parsed arguments
    pub async fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting panelkit v{}", crate::VERSION);
        debug!("Configuration loaded from: {:?}", args.config);

        self.apply_overrides(&args);

        match args.command {
            Commands::Dashboard { .. } => {
                commands::serve_dashboard(&self.config.templates, &self.config.dashboard).await
            }

            Commands::Users { .. } => commands::serve_users(&self.config.users).await,

            Commands::Render {
                page,
                partial,
                layout,
                title,
                data,
                meta,
            } => {
                let request = RenderRequest {
                    page,
                    partial,
                    layout,
                    title,
                    data,
                    meta,
                };
                let html = commands::render_page(&self.config.templates, &request)?;
                println!("{}", html);
                Ok(())
            }

            Commands::Resolve { name } => {
                let resolved = commands::resolve_template(&self.config.templates, &name)?;
                println!("{}", resolved);
                Ok(())
            }
        }
    }

    /// Create application from parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_app_creation() {
        let app = App::new(Config::default());
        assert_eq!(app.config().dashboard.api_delay_ms, 0);
    }

    #[test]
    fn test_dashboard_overrides() {
        let args = Args::parse_from([
            "panelkit",
            "dashboard",
            "--addr",
            "0.0.0.0:9000",
            "--api-delay-ms",
            "500",
            "--templates",
            "./site",
        ]);
        let mut app = App::new(Config::default());
        app.apply_overrides(&args);

        assert_eq!(app.config().dashboard.addr, "0.0.0.0:9000");
        assert_eq!(app.config().dashboard.api_delay_ms, 500);
        assert_eq!(app.config().templates.root, PathBuf::from("./site"));
    }

    #[test]
    fn test_users_tenant_override() {
        let args = Args::parse_from(["panelkit", "users", "--tenant", "acme"]);
        let mut app = App::new(Config::default());
        app.apply_overrides(&args);
        assert_eq!(app.config().users.default_tenant, "acme");
    }
}
