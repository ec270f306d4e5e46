// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for panelkit

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "panelkit")]
#[command(about = "Server-rendered admin dashboard and user-management service")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 't',
        long,
        global = true,
        help = "Project template directory (holds layouts/ and pages/)"
    )]
    pub templates: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the admin dashboard
    Dashboard {
        #[arg(short, long, help = "Listen address (host:port)")]
        addr: Option<String>,

        #[arg(long, help = "Artificial delay for /api fragments in milliseconds")]
        api_delay_ms: Option<u64>,

        #[arg(long, help = "Directory served under /static")]
        static_dir: Option<PathBuf>,

        #[arg(long, help = "Directory served under /components")]
        components_dir: Option<PathBuf>,
    },

    /// Serve the user-management JSON API
    Users {
        #[arg(short, long, help = "Listen address (host:port)")]
        addr: Option<String>,

        #[arg(long, help = "Tenant every request acts on")]
        tenant: Option<String>,
    },

    /// Render a page and print the HTML
    Render {
        #[arg(help = "Logical page name, e.g. 'dashboard' or 'users'")]
        page: String,

        #[arg(long, help = "Print only the page content without the layout")]
        partial: bool,

        #[arg(long, help = "Layout to use instead of the configured one")]
        layout: Option<String>,

        #[arg(long, help = "Page title", default_value = "Panelkit")]
        title: String,

        #[arg(long, help = "Page data as a JSON object")]
        data: Option<String>,

        #[arg(
            short = 'm',
            long = "meta",
            help = "Meta tags (key=value), including full_layout and main_layout"
        )]
        meta: Vec<String>,
    },

    /// Show where a template name resolves
    Resolve {
        #[arg(help = "Template file name, e.g. 'base.html' or 'users.html'")]
        name: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse meta tags from key=value format
    pub fn parse_pairs(pairs: &[String]) -> anyhow::Result<Vec<(String, String)>> {
        pairs
            .iter()
            .map(|pair| {
                pair.split_once('=')
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .ok_or_else(|| {
                        anyhow::anyhow!("Invalid meta tag format '{}'. Expected 'key=value'", pair)
                    })
            })
            .collect()
    }
}
