// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for envali.
//!
//! Pure data and rules: what an entity exposes, what a directive asks for,
//! which field types each directive accepts, and what a validation pass
//! reports. Evaluation lives in `crate::application`.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: content rows arrive through the application's ports
//! - **No regex engine**: patterns are plain strings here
//! - **Immutable values**: directives and results are Clone + PartialEq
//!
pub mod bound;
pub mod catalog;
pub mod directive;
pub mod entity;
pub mod error;
pub mod field;
pub mod pattern;
pub mod result;

pub use bound::{Bound, BoundMismatch, Numeric};
pub use catalog::{DIRECTIVE_CATALOG, DirectiveDef, find_directive};
pub use directive::{Directive, DirectiveKind, Rule, Severity};
pub use entity::{EntityType, Validatable};
pub use error::{DomainError, ErrorCategory};
pub use field::{Elements, Field, FieldType, FieldValue};
pub use pattern::{PatternSpec, RegexMethod, RegexModifier, RegexPreset};
pub use result::{BusinessError, ErrorKind, ValidationResult};
