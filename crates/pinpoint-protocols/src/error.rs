//! Overlay installation errors.
//!
//! Event handlers never return errors; only installation (style insertion,
//! listener attachment) can fail.

use thiserror::Error;

use crate::events::ListenerKind;

#[derive(Debug, Error)]
pub enum OverlayError {
    /// No document, window or body to install into.
    #[error("Document unavailable: {0}")]
    DocumentUnavailable(String),

    #[error("Failed to install style '{id}': {message}")]
    StyleInstall { id: String, message: String },

    #[error("Failed to attach {kind} listener: {message}")]
    ListenerAttach { kind: ListenerKind, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
