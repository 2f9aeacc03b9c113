// ============================================================================
// domain/error.rs - VALIDATION DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant aborts the validation pass that raised it; business errors
/// are values, not `DomainError`s.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Usage Errors (directive misuse)
    // ========================================================================
    #[error(
        "The {directive} directive supports {supported} types, but was specified for the field {entity}#{field} of type {actual}"
    )]
    UnsupportedFieldType {
        directive: String,
        supported: String,
        entity: String,
        field: String,
        actual: String,
    },

    #[error(
        "The field {entity}#{field} of type {actual} is marked NestedEntity but does not hold validatable entities"
    )]
    NotValidatable {
        entity: String,
        field: String,
        actual: String,
    },

    #[error("The {directive} directive on {entity}#{field} needs a {parameter} but none was given")]
    MissingParameter {
        directive: String,
        entity: String,
        field: String,
        parameter: &'static str,
    },

    #[error("Invalid {parameter} '{value}' for {directive} on {entity}#{field}: {reason}")]
    InvalidParameter {
        directive: String,
        entity: String,
        field: String,
        parameter: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid pattern '{pattern}' for {entity}#{field}: {reason}")]
    InvalidPattern {
        entity: String,
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Cyclic entity graph: {entity} is already being validated")]
    CyclicEntity { entity: String },

    // ========================================================================
    // Fail-fast Violations
    // ========================================================================
    #[error("{directive} violated by {entity}#{field}{}", detail(.message))]
    FailFast {
        directive: String,
        entity: String,
        field: String,
        message: String,
    },

    // ========================================================================
    // Result Lookups
    // ========================================================================
    #[error("No business errors were recorded for {entity}")]
    NoErrorsRecorded { entity: String },
}

fn detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedFieldType {
                directive,
                supported,
                ..
            } => vec![
                format!("{directive} can only be attached to: {supported}"),
                "Remove the directive or change the field's type".into(),
            ],
            Self::NotValidatable { actual, .. } => vec![
                format!("Implement Validatable for {actual}"),
                "Build collection values with FieldValue::entity_list / entity_map / entity_set"
                    .into(),
            ],
            Self::MissingParameter { parameter, .. } => vec![
                format!("Supply a {parameter} on the directive"),
                "Or declare a content mapping on the entity".into(),
            ],
            Self::InvalidParameter { .. } => vec![
                "Make sure the bound fits the field's numeric width".into(),
                "Content values must be plain numbers, e.g. \"10\" or \"-2.5\"".into(),
            ],
            Self::InvalidPattern { .. } => {
                vec!["Check the regular expression syntax".into()]
            }
            Self::CyclicEntity { entity } => vec![
                format!("{entity} refers back to itself through NestedEntity fields"),
                "Break the cycle or drop NestedEntity on the back reference".into(),
            ],
            Self::FailFast { .. } => vec![
                "Use a recoverable or unrecoverable severity to collect this error instead".into(),
            ],
            Self::NoErrorsRecorded { .. } => {
                vec!["Call has_error_of before get_error".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFieldType { .. }
            | Self::NotValidatable { .. }
            | Self::MissingParameter { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidPattern { .. }
            | Self::CyclicEntity { .. } => ErrorCategory::Usage,
            Self::FailFast { .. } => ErrorCategory::Violation,
            Self::NoErrorsRecorded { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Violation,
    NotFound,
}
