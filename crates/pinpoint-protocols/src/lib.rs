//! # Pinpoint Protocols
//!
//! Core protocol definitions (traits) for the Pinpoint annotation overlay.
//! Contains interface definitions and the shared data shapes that cross them,
//! no engine logic.
//!
//! ## Core Traits
//!
//! - [`Document`] - Capability view of the host page's DOM
//! - [`EventHost`] - Attaches and detaches page-level listeners
//! - [`SelectionNotifier`] - Outbound port receiving captured selections

pub mod capture;
pub mod dom;
pub mod error;
pub mod events;
pub mod notify;

pub use capture::{AttributeMap, CapturedElement};
pub use dom::{ControlKind, Document, EventHost};
pub use error::OverlayError;
pub use events::{EventDisposition, ListenerKind};
pub use notify::{SelectionEvent, SelectionNotifier};
