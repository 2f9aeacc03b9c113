//! Application layer for envali.
//!
//! This layer contains:
//! - **Services**: the `Validator` use case
//! - **Ports**: the `ContentLoader` trait for external directive parameters
//! - **Strategies**: one predicate implementation per cataloged directive
//! - **Errors**: content resolution errors
//!
//! Which directives exist and which field types they accept is decided by
//! the catalog in `crate::domain`; this layer only evaluates them.

pub mod error;
pub mod ports;
pub mod services;

mod dispatch;
mod resolver;
mod strategy;

pub use services::{CollectionPolicy, Validator};

// Re-export port traits (for adapter implementation)
pub use ports::{ContentLoader, ContentQuery, ContentRow, NoContent, ResourceId};

pub use error::ApplicationError;
pub use strategy::compile_pattern;
