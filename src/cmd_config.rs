//! Config subcommand handlers.

use std::path::Path;

use tracing::{info, warn};

use pinpoint_config::{Config, ConfigError, ConfigLoader, ConfigValidator, ValidationResult};

use crate::cli::ConfigAction;

/// Handle config subcommands.
pub(crate) fn handle_config_command(
    action: ConfigAction,
    path: Option<&Path>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Check => config_check(path),
        ConfigAction::Show => {
            println!("{}", render(config)?);
            Ok(())
        }
    }
}

/// Reject a configuration the engine cannot run with, logging warnings.
pub(crate) fn ensure_valid(config: &Config) -> Result<(), ConfigError> {
    let warnings = ConfigValidator::validate(config).into_result()?;
    for warning in &warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    Ok(())
}

fn config_check(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    let result = ConfigValidator::validate(&config);

    for line in report_lines(&result) {
        println!("{}", line);
    }

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    if result.is_valid() {
        info!(source = %source, warnings = result.warnings.len(), "Configuration is valid");
        println!("{}: OK", source);
        Ok(())
    } else {
        Err(format!("{}: {} error(s)", source, result.errors.len()).into())
    }
}

fn report_lines(result: &ValidationResult) -> Vec<String> {
    let errors = result
        .errors
        .iter()
        .map(|e| format!("error: {}: {}", e.path, e.message));
    let warnings = result
        .warnings
        .iter()
        .map(|w| format!("warning: {}: {}", w.path, w.message));
    errors.chain(warnings).collect()
}

fn render(config: &Config) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
