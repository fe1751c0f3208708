//! CLI definitions for Pinpoint.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pinpoint_config::SelectionPolicy;

/// Pinpoint CLI.
#[derive(Parser)]
#[command(name = "pinpoint")]
#[command(about = "Point-and-capture element annotation with stable XPath locators")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults are used when absent)
    #[arg(short, long, env = "PINPOINT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Override the selection policy (dual-role, single-lock)
    #[arg(long, global = true)]
    pub policy: Option<SelectionPolicy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Replay an event script against a page fixture
    Replay {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Event script (JSON array of steps)
        #[arg(long)]
        script: PathBuf,

        /// Deliver notifications to the configured endpoint
        #[arg(long)]
        notify: bool,
    },

    /// Resolve a locator against a page fixture and print its capture
    Locate {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// XPath as produced by the overlay
        xpath: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Validate the configuration file
    Check,

    /// Print the effective configuration as TOML
    Show,
}
