//! In-memory document errors.

use thiserror::Error;

/// Fixture loading errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fixture root must be <html> or <body>, got <{0}>")]
    InvalidRoot(String),

    #[error("Fixture has no <body> element")]
    MissingBody,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Locator resolution errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Locator matched nothing: {0}")]
    NotFound(String),

    #[error("Locator '{locator}' matched {count} elements, expected 1")]
    Ambiguous { locator: String, count: usize },

    #[error("Could not reliably locate element: {0}")]
    Unresolvable(String),
}
