//! Application layer errors.
//!
//! These errors come from fetching directive parameters through the content
//! port, not from evaluating directives. Evaluation errors are
//! `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while resolving external content.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The resource backing a content mapping does not exist.
    #[error("Content resource not found: {resource}")]
    ContentNotFound { resource: String },

    /// The resource exists but has no row for the field.
    #[error("Content resource {resource} has no row for variable '{field}'")]
    ContentRowMissing { resource: String, field: String },

    /// The field's row lacks an attribute a directive needs.
    #[error("Content row for '{field}' in {resource} has no '{attribute}' attribute")]
    ContentAttributeMissing {
        resource: String,
        field: String,
        attribute: &'static str,
    },

    /// The resource could not be parsed.
    #[error("Content resource {resource} is malformed: {reason}")]
    MalformedContent { resource: String, reason: String },

    /// A shared loader's lock was poisoned.
    #[error("Content loader lock poisoned")]
    LoaderLock,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ContentNotFound { resource } => vec![
                format!("Create {resource}"),
                "Or remove the entity's content mapping".into(),
            ],
            Self::ContentRowMissing { field, .. } => vec![
                format!("Add a node with \"variableName\": \"{field}\""),
                "Try: envali check to lint every content resource".into(),
            ],
            Self::ContentAttributeMissing {
                field, attribute, ..
            } => vec![format!("Add \"{attribute}\" to the node for '{field}'")],
            Self::MalformedContent { .. } => vec![
                "Content resources are JSON objects with a \"selectionNodes\" array".into(),
                "Try: envali check to see every problem at once".into(),
            ],
            Self::LoaderLock => vec![
                "A thread panicked while holding the content loader".into(),
                "Try again with a fresh loader".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ContentNotFound { .. } => ErrorCategory::NotFound,
            Self::ContentRowMissing { .. }
            | Self::ContentAttributeMissing { .. }
            | Self::MalformedContent { .. } => ErrorCategory::Configuration,
            Self::LoaderLock => ErrorCategory::Internal,
        }
    }
}
