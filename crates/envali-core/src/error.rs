//! Unified error handling for envali core.
//!
//! Wraps domain and application errors behind one type so callers of
//! `Validator::validate` deal with a single error enum.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for envali core operations.
///
/// Any `Err` from a validation call means the pass did not complete and no
/// partial result exists.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvaliError {
    /// Directive misuse or a fail-fast violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External content could not be resolved.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl EnvaliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Usage => ErrorCategory::Usage,
                crate::domain::ErrorCategory::Violation => ErrorCategory::Violation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when a fail-fast directive was violated.
    pub fn is_fail_fast(&self) -> bool {
        matches!(self, Self::Domain(DomainError::FailFast { .. }))
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::LoaderLock))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Violation,
    Configuration,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type EnvaliResult<T> = Result<T, EnvaliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_fast_is_detected() {
        let err: EnvaliError = DomainError::FailFast {
            directive: "RequirePositive".into(),
            entity: "Order".into(),
            field: "quantity".into(),
            message: String::new(),
        }
        .into();
        assert!(err.is_fail_fast());
        assert_eq!(err.category(), ErrorCategory::Violation);
    }

    #[test]
    fn missing_content_is_not_found() {
        let err: EnvaliError = ApplicationError::ContentNotFound {
            resource: "content/envali/order.json".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.is_fail_fast());
        assert!(err.suggestions()[0].contains("order.json"));
    }

    #[test]
    fn only_lock_errors_are_retryable() {
        assert!(EnvaliError::from(ApplicationError::LoaderLock).is_retryable());
        assert!(
            !EnvaliError::from(DomainError::CyclicEntity {
                entity: "Node".into()
            })
            .is_retryable()
        );
    }

    #[test]
    fn display_is_transparent() {
        let err = EnvaliError::from(ApplicationError::LoaderLock);
        assert_eq!(err.to_string(), "Content loader lock poisoned");
    }
}
