//! Infrastructure adapters for envali.
//!
//! This crate implements the ports defined in `envali-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod content;

// Re-export commonly used adapters
pub use content::{
    ContentDocument, ContentIssue, FilesystemContentLoader, InMemoryContentLoader, lint,
};
