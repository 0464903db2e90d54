//! MoodMatch Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod server;
pub mod session;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog, ContentItem, ContentKind, Mood};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use session::{VisitMachine, VisitStore};
