//! # Pinpoint Core
//!
//! The element annotation engine.
//!
//! ## Components
//!
//! - [`AnnotationEngine`] - Owns the session and routes page events
//! - [`SetupGuard`] - Idempotent install/teardown of styles and listeners
//! - [`HighlightTracker`] - Transient hover highlight
//! - [`SelectionMachine`] - Click-to-lock under the configured [`SelectionPolicy`]
//! - [`InputSuppressor`] - Blocks typing, dropdowns and change events while active
//! - [`LocatorSynthesizer`] - Canonical XPath and attribute capture
//!
//! The engine is generic over [`pinpoint_protocols::Document`], so the same
//! code drives a browser page and the in-memory document used by tests and
//! the replay CLI.

pub mod engine;
pub mod guard;
pub mod highlight;
pub mod locator;
pub mod notify;
pub mod registry;
pub mod selection;
pub mod session;
pub mod styles;
pub mod suppress;

pub use engine::{truthy, AnnotationEngine};
pub use guard::SetupGuard;
pub use highlight::HighlightTracker;
pub use locator::LocatorSynthesizer;
pub use notify::LogNotifier;
pub use registry::ListenerRegistry;
pub use selection::SelectionMachine;
pub use session::{AnnotationSession, SessionSnapshot};
pub use styles::{stylesheet, RoleClasses};
pub use suppress::InputSuppressor;

pub use pinpoint_config::SelectionPolicy;
