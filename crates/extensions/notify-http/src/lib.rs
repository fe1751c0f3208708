//! # Pinpoint HTTP Notifier
//!
//! Signals selection events to the external listener with a body-less
//! `GET <endpoint>/notify-<role>-selected`. The listener reads the capture
//! from the page itself (`window._selectedElement`). Delivery is
//! fire-and-forget: the request is spawned on the ambient tokio runtime,
//! never awaited, and its response is never read.

mod error;
mod notifier;

pub use error::NotifyError;
pub use notifier::HttpNotifier;
