//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `envali-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ContentLoader`: directive parameters from external content
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `Validator::validate` (used directly by callers and the CLI)

pub mod output;

pub use output::{
    CONTENT_EXTENSION, CONTENT_ROOT, ContentAttribute, ContentLoader, ContentQuery, ContentRow,
    NoContent, ResourceId, SELECTOR_KEY,
};

#[cfg(test)]
pub use output::MockContentLoader;
