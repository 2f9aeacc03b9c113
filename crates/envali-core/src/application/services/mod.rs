//! Application services - orchestrate use cases.
//!
//! `Validator` is the single use case: validate an entity graph against
//! its directives, reading parameters through the `ContentLoader` port.

pub mod validator;

pub use validator::{CollectionPolicy, Validator};
