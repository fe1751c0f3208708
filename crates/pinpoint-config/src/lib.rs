//! # Pinpoint Config
//!
//! Configuration management for the Pinpoint overlay: selection policy,
//! role class names, notification endpoint and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
