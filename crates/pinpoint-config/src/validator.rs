//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_overlay(config, &mut result);
        Self::validate_styles(config, &mut result);
        Self::validate_notify(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_overlay(config: &Config, result: &mut ValidationResult) {
        if config.overlay.text_limit == 0 {
            result.add_error(ValidationError::new(
                "overlay.text_limit",
                "text_limit must be greater than 0",
            ));
        }

        if config.overlay.cursor.trim().is_empty() {
            result.add_error(ValidationError::new(
                "overlay.cursor",
                "cursor cannot be empty",
            ));
        }
    }

    fn validate_styles(config: &Config, result: &mut ValidationResult) {
        let styles = &config.styles;

        if styles.style_id.trim().is_empty() {
            result.add_error(ValidationError::new(
                "styles.style_id",
                "style_id cannot be empty",
            ));
        }

        let classes = [
            ("styles.highlight_class", &styles.highlight_class),
            ("styles.locked_class", &styles.locked_class),
            ("styles.primary_class", &styles.primary_class),
            ("styles.secondary_class", &styles.secondary_class),
        ];

        for (path, class) in &classes {
            if class.trim().is_empty() {
                result.add_error(ValidationError::new(*path, "class name cannot be empty"));
            } else if class.chars().any(char::is_whitespace) {
                result.add_error(ValidationError::new(
                    *path,
                    "class name cannot contain whitespace",
                ));
            }
        }

        // Role classes must be mutually exclusive.
        for (i, (path_a, a)) in classes.iter().enumerate() {
            for (path_b, b) in classes.iter().skip(i + 1) {
                if !a.is_empty() && a == b {
                    result.add_error(ValidationError::new(
                        *path_b,
                        format!("class '{}' is also used by {}", b, path_a),
                    ));
                }
            }
        }
    }

    fn validate_notify(config: &Config, result: &mut ValidationResult) {
        if !config.notify.enabled {
            result.add_warning(ValidationWarning::new(
                "notify.enabled",
                "notifications are disabled, selections will only be logged",
            ));
            return;
        }

        match Url::parse(&config.notify.endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => result.add_error(ValidationError::new(
                "notify.endpoint",
                format!("endpoint scheme must be http or https, got '{}'", url.scheme()),
            )),
            Err(e) => result.add_error(ValidationError::new(
                "notify.endpoint",
                format!("invalid endpoint URL: {}", e),
            )),
        }

        if config.notify.endpoint.contains("/notify-") {
            result.add_warning(ValidationWarning::new(
                "notify.endpoint",
                "endpoint should be the base URL, event paths are appended automatically",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level = config.logging.level.to_lowercase();
        if !valid_levels.contains(&level.as_str()) && !level.contains('=') {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
