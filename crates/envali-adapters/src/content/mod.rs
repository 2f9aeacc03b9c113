//! Content loader adapters.
//!
//! Implementations of `envali_core::application::ports::ContentLoader`:
//! - [`FilesystemContentLoader`]: JSON documents under `content/envali/`
//! - [`InMemoryContentLoader`]: rows held in memory

pub mod document;
pub mod filesystem;
pub mod lint;
pub mod memory;

pub use document::{ContentDocument, SelectionNode};
pub use filesystem::FilesystemContentLoader;
pub use lint::{ContentIssue, lint};
pub use memory::InMemoryContentLoader;
