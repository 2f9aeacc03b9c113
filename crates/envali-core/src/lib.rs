//! Envali Core - declarative field validation
//!
//! This crate provides the domain and application layers for envali, a
//! validation engine driven by directives attached to entity fields,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     caller code / envali-cli (CLI)      │
//! │       (Implements Validatable)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (Validator: walk, dispatch, resolve)  │
//! │      One strategy per directive kind    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (Driven: ContentLoader)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     envali-adapters (Infrastructure)    │
//! │ (FilesystemContentLoader, InMemory...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Field, Directive, Catalog, Result)     │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use envali_core::prelude::*;
//!
//! struct Account {
//!     owner: String,
//!     balance: i64,
//! }
//!
//! impl Validatable for Account {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("owner", &self.owner)
//!                 .with(Directive::start_with("acct-").recoverable("bad owner prefix")),
//!             Field::new("balance", self.balance)
//!                 .with(Directive::positive().unrecoverable("balance must be positive")),
//!         ]
//!     }
//! }
//!
//! let account = Account { owner: "acct-7".into(), balance: -3 };
//! let result = envali_core::validate(&account).unwrap();
//!
//! let errors = result.get_error::<Account>().unwrap();
//! assert_eq!(errors.len(), 1);
//! assert!(errors[0].is_unrecoverable());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CollectionPolicy, Validator,
        ports::{ContentLoader, ContentQuery, ContentRow, ResourceId},
    };
    pub use crate::domain::{
        Bound, BusinessError, Directive, EntityType, ErrorKind, Field, FieldType, FieldValue,
        PatternSpec, RegexMethod, RegexModifier, RegexPreset, Severity, Validatable,
        ValidationResult,
    };
    pub use crate::error::{EnvaliError, EnvaliResult};
}

/// Version of the envali core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate `entity` with a default [`application::Validator`].
///
/// Entities that declare a content mapping need a validator built with a
/// content loader instead.
pub fn validate(entity: &dyn domain::Validatable) -> error::EnvaliResult<domain::ValidationResult> {
    application::Validator::default().validate(entity)
}
