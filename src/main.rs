//! Pinpoint - point-and-capture element annotation
//!
//! Host-side CLI: replays event scripts against page fixtures, resolves
//! captured locators, and validates configuration. The in-page overlay
//! itself is built from `crates/extensions/overlay-web`.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use pinpoint_config::ConfigLoader;
use pinpoint_core::{AnnotationEngine, LogNotifier};
use pinpoint_dom_memory::{MemoryDocument, PageFixture};
use pinpoint_notify_http::HttpNotifier;
use pinpoint_protocols::SelectionNotifier;

mod cli;
mod cmd_config;
mod cmd_replay;
mod logging;

use cli::{Cli, Commands};
use cmd_config::{ensure_valid, handle_config_command};

/// Time left for spawned notification requests before the runtime shuts down.
const NOTIFY_GRACE: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    if let Some(policy) = cli.policy {
        config.overlay.policy = policy;
    }

    logging::init_tracing(&config.logging)?;

    match cli.command {
        Commands::Replay {
            page,
            script,
            notify,
        } => {
            ensure_valid(&config)?;
            let document = MemoryDocument::from_fixture(&PageFixture::from_file(&page)?)?;
            let steps = cmd_replay::load_script(&script)?;

            let deliver = notify && config.notify.enabled;
            if notify && !config.notify.enabled {
                warn!("Notifications are disabled in config, logging instead");
            }
            let notifier: Arc<dyn SelectionNotifier> = if deliver {
                Arc::new(HttpNotifier::new(&config.notify.endpoint)?)
            } else {
                Arc::new(LogNotifier)
            };
            info!(notifier = notifier.name(), page = %page.display(), "Starting replay");

            let mut engine = AnnotationEngine::new(document, &config, notifier);
            let report = cmd_replay::replay(&mut engine, &config, &steps)?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if deliver {
                tokio::time::sleep(NOTIFY_GRACE).await;
            }
            Ok(())
        }
        Commands::Locate { page, xpath } => {
            ensure_valid(&config)?;
            let document = MemoryDocument::from_fixture(&PageFixture::from_file(&page)?)?;
            let capture = cmd_replay::locate(&document, &xpath, config.overlay.text_limit)?;
            println!("{}", serde_json::to_string_pretty(&capture)?);
            Ok(())
        }
        Commands::Config { action } => {
            handle_config_command(action, cli.config.as_deref(), &config)
        }
    }
}
