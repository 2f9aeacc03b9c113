//! Business errors and the aggregated validation result.

use std::fmt;

use serde::Serialize;

use crate::domain::entity::EntityType;
use crate::domain::error::DomainError;

/// Classification of a [`BusinessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    None,
    Recoverable,
    Unrecoverable,
    Nested,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Recoverable => "recoverable",
            Self::Unrecoverable => "unrecoverable",
            Self::Nested => "nested",
        };
        f.write_str(name)
    }
}

/// Outcome of one directive on one field.
///
/// `None` marks a passing directive and is never stored in a
/// [`ValidationResult`].
#[derive(Debug, Clone, PartialEq)]
pub enum BusinessError {
    None,
    Recoverable { message: String },
    Unrecoverable { message: String },
    /// Wraps the non-empty result of a nested entity.
    Nested(ValidationResult),
}

impl BusinessError {
    pub fn none() -> Self {
        Self::None
    }

    pub fn recoverable(message: impl Into<String>) -> Self {
        Self::Recoverable {
            message: message.into(),
        }
    }

    pub fn unrecoverable(message: impl Into<String>) -> Self {
        Self::Unrecoverable {
            message: message.into(),
        }
    }

    pub fn nested(result: ValidationResult) -> Self {
        Self::Nested(result)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::None => ErrorKind::None,
            Self::Recoverable { .. } => ErrorKind::Recoverable,
            Self::Unrecoverable { .. } => ErrorKind::Unrecoverable,
            Self::Nested(_) => ErrorKind::Nested,
        }
    }

    /// The configured message; empty for `None` and `Nested`.
    pub fn message(&self) -> &str {
        match self {
            Self::Recoverable { message } | Self::Unrecoverable { message } => message,
            Self::None | Self::Nested(_) => "",
        }
    }

    /// The wrapped result of a nested error.
    pub fn nested_result(&self) -> Option<&ValidationResult> {
        match self {
            Self::Nested(result) => Some(result),
            _ => None,
        }
    }

    pub fn has_error(&self) -> bool {
        match self {
            Self::None => false,
            Self::Nested(result) => result.has_error(),
            Self::Recoverable { .. } | Self::Unrecoverable { .. } => true,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable { .. })
    }

    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Self::Unrecoverable { .. })
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

/// Errors of one validation call, keyed by entity type.
///
/// Types without errors are absent. Entries keep the order in which their
/// first error was recorded; errors within an entry keep field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    entries: Vec<(EntityType, Vec<BusinessError>)>,
}

impl ValidationResult {
    /// A result without errors.
    pub fn none() -> Self {
        Self::default()
    }

    /// Record `error` for `entity`. Passing errors are dropped.
    pub fn record(&mut self, entity: EntityType, error: BusinessError) {
        if !error.has_error() {
            return;
        }
        match self.entries.iter_mut().find(|(ty, _)| *ty == entity) {
            Some((_, errors)) => errors.push(error),
            None => self.entries.push((entity, vec![error])),
        }
    }

    /// Append every entry of `other`, preserving its order.
    pub fn merge(&mut self, other: &ValidationResult) {
        for (entity, errors) in &other.entries {
            for error in errors {
                self.record(*entity, error.clone());
            }
        }
    }

    /// `true` when any entity in the traversal produced an error.
    pub fn has_error(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn has_error_of<T: ?Sized + 'static>(&self) -> bool {
        self.has_error_for(EntityType::of::<T>())
    }

    pub fn has_error_for(&self, entity: EntityType) -> bool {
        self.entries.iter().any(|(ty, _)| *ty == entity)
    }

    /// Errors recorded for `T`.
    ///
    /// Fails with [`DomainError::NoErrorsRecorded`] when `T` produced none;
    /// check [`Self::has_error_of`] first.
    pub fn get_error<T: ?Sized + 'static>(&self) -> Result<&[BusinessError], DomainError> {
        self.get_error_for(EntityType::of::<T>())
    }

    pub fn get_error_for(&self, entity: EntityType) -> Result<&[BusinessError], DomainError> {
        self.entries
            .iter()
            .find(|(ty, _)| *ty == entity)
            .map(|(_, errors)| errors.as_slice())
            .ok_or_else(|| DomainError::NoErrorsRecorded {
                entity: entity.short_name().to_owned(),
            })
    }

    pub fn entity_types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.entries.iter().map(|(ty, _)| *ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityType, &[BusinessError])> + '_ {
        self.entries.iter().map(|(ty, errors)| (*ty, errors.as_slice()))
    }

    /// Number of entity types with errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parent;
    struct Child;

    #[test]
    fn empty_result_has_no_error() {
        let result = ValidationResult::none();
        assert!(!result.has_error());
        assert!(result.is_empty());
        assert!(!result.has_error_of::<Parent>());
    }

    #[test]
    fn none_errors_are_not_recorded() {
        let mut result = ValidationResult::none();
        result.record(EntityType::of::<Parent>(), BusinessError::none());
        assert!(!result.has_error());
    }

    #[test]
    fn errors_keep_insertion_order() {
        let mut result = ValidationResult::none();
        let parent = EntityType::of::<Parent>();
        result.record(parent, BusinessError::recoverable("first"));
        result.record(parent, BusinessError::unrecoverable("second"));

        let errors = result.get_error::<Parent>().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message(), "first");
        assert!(errors[1].is_unrecoverable());
    }

    #[test]
    fn get_error_fails_for_absent_type() {
        let result = ValidationResult::none();
        assert_eq!(
            result.get_error::<Child>(),
            Err(DomainError::NoErrorsRecorded {
                entity: "Child".into()
            })
        );
    }

    #[test]
    fn merge_folds_child_entries() {
        let mut child = ValidationResult::none();
        child.record(EntityType::of::<Child>(), BusinessError::recoverable("bad"));

        let mut parent = ValidationResult::none();
        parent.record(EntityType::of::<Parent>(), BusinessError::nested(child.clone()));
        parent.merge(&child);

        assert_eq!(parent.len(), 2);
        assert!(parent.has_error_of::<Child>());
        let wrapped = &parent.get_error::<Parent>().unwrap()[0];
        assert_eq!(wrapped.kind(), ErrorKind::Nested);
        assert_eq!(wrapped.nested_result(), Some(&child));
    }

    #[test]
    fn empty_nested_is_not_an_error() {
        assert!(!BusinessError::nested(ValidationResult::none()).has_error());
    }
}
