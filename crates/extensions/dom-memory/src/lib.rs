//! # Pinpoint In-Memory Document
//!
//! An arena-backed [`Document`](pinpoint_protocols::Document) implementation.
//! Pages are built from JSON fixtures, element handles are plain indices, and
//! the host-side default actions (typing into a field) are simulated so event
//! suppression can be observed without a browser.
//!
//! Also provides locator evaluation for the XPath forms the synthesizer emits,
//! and capture lookup (XPath first, then `id`) for resolving captured data back
//! to a node.

mod document;
mod error;
mod fixture;
mod host;
mod xpath;

pub use document::{MemoryDocument, NodeId};
pub use error::{FixtureError, LookupError};
pub use fixture::PageFixture;
pub use host::MemoryEventHost;
