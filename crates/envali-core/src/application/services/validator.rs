//! Validator Service - walks an entity graph and evaluates directives.
//!
//! The walk is synchronous and depth-first:
//! 1. Enumerate the entity's fields in declaration order
//! 2. Dispatch every directive of a field, in attachment order
//! 3. Record non-passing outcomes; nested results are also merged
//!
//! Any `Err` aborts the whole pass, including from inside nested entities.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dispatch::DispatchContext;
use crate::application::ports::{ContentLoader, NoContent};
use crate::application::resolver::ParameterResolver;
use crate::domain::{DomainError, EntityType, Validatable, ValidationResult};
use crate::error::EnvaliResult;

/// How a `NestedEntity` directive on a collection treats failing elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionPolicy {
    /// Stop at the first element with errors and report only that element.
    #[default]
    StopAtFirst,
    /// Visit every element and report the merged errors of all of them.
    AggregateAll,
}

/// Entry point for validating entities.
///
/// Cheap to clone; clones share the content loader.
///
/// # Example
///
/// ```rust
/// use envali_core::application::Validator;
/// use envali_core::domain::{Directive, Field, Validatable};
///
/// struct Order {
///     quantity: i32,
/// }
///
/// impl Validatable for Order {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::new("quantity", self.quantity)
///             .with(Directive::range(1, 99).recoverable("1 to 99 items"))]
///     }
/// }
///
/// let result = Validator::default().validate(&Order { quantity: 120 }).unwrap();
/// assert!(result.has_error_of::<Order>());
/// ```
#[derive(Clone)]
pub struct Validator {
    loader: Arc<dyn ContentLoader>,
    collection_policy: CollectionPolicy,
}

impl Validator {
    /// Create a validator that reads content through `loader`.
    pub fn new(loader: impl ContentLoader + 'static) -> Self {
        Self::with_loader(Arc::new(loader))
    }

    /// Create a validator around a shared loader.
    pub fn with_loader(loader: Arc<dyn ContentLoader>) -> Self {
        Self {
            loader,
            collection_policy: CollectionPolicy::default(),
        }
    }

    pub fn with_collection_policy(mut self, policy: CollectionPolicy) -> Self {
        self.collection_policy = policy;
        self
    }

    pub fn collection_policy(&self) -> CollectionPolicy {
        self.collection_policy
    }

    /// Validate `entity` and everything reachable through `NestedEntity`.
    ///
    /// # Errors
    ///
    /// - `DomainError::FailFast` when a fail-fast directive is violated
    /// - Other `DomainError`s when a directive is misused
    /// - `ApplicationError`s when content cannot be resolved
    #[instrument(skip_all, fields(entity = %entity.entity_type()))]
    pub fn validate(&self, entity: &dyn Validatable) -> EnvaliResult<ValidationResult> {
        let mut walk = Walk {
            validator: self,
            stack: Vec::new(),
        };
        let result = walk.entity(entity)?;
        debug!(entity_types = result.len(), "Validation completed");
        Ok(result)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(NoContent)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("collection_policy", &self.collection_policy)
            .finish_non_exhaustive()
    }
}

/// Type and address of an entity currently on the walk.
type EntityIdentity = (TypeId, usize);

/// State of one validation pass.
pub(crate) struct Walk<'v> {
    validator: &'v Validator,
    stack: Vec<EntityIdentity>,
}

impl Walk<'_> {
    pub(crate) fn policy(&self) -> CollectionPolicy {
        self.validator.collection_policy
    }

    /// Validate one entity of the graph.
    pub(crate) fn entity(&mut self, entity: &dyn Validatable) -> EnvaliResult<ValidationResult> {
        let entity_type = entity.entity_type();
        let address = std::ptr::from_ref(entity).cast::<()>() as usize;
        let identity = (entity_type.id(), address);

        if self.stack.contains(&identity) {
            return Err(DomainError::CyclicEntity {
                entity: entity_type.short_name().to_owned(),
            }
            .into());
        }

        self.stack.push(identity);
        let outcome = self.fields(entity, entity_type);
        self.stack.pop();
        outcome
    }

    fn fields(
        &mut self,
        entity: &dyn Validatable,
        entity_type: EntityType,
    ) -> EnvaliResult<ValidationResult> {
        let validator = self.validator;
        let loader = validator.loader.as_ref();
        let mapping = entity.content_mapping();
        let mut result = ValidationResult::none();

        for field in entity.fields() {
            let mut resolver = ParameterResolver::new(loader, entity_type, mapping, field.name());
            let mut cx = DispatchContext {
                walk: &mut *self,
                entity_type,
                field: &field,
                resolver: &mut resolver,
            };

            for directive in field.directives() {
                let error = cx.dispatch(directive)?;
                let nested = error.nested_result().cloned();
                result.record(entity_type, error);
                if let Some(child) = nested {
                    result.merge(&child);
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ContentRow, MockContentLoader};
    use crate::domain::{Directive, Field};

    struct Limits {
        low: i32,
        high: i32,
        label: String,
    }

    impl Validatable for Limits {
        fn content_mapping(&self) -> Option<&str> {
            Some("limits")
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("low", self.low)
                    .with(Directive::range_from(0).recoverable("low too small"))
                    .with(Directive::range_to(0).recoverable("low too large")),
                Field::new("high", self.high)
                    .with(Directive::range_from(0).recoverable("high too small")),
                Field::new("label", &self.label).with(Directive::non_blank()),
            ]
        }
    }

    fn limits() -> Limits {
        Limits {
            low: 5,
            high: 50,
            label: "x".into(),
        }
    }

    #[test]
    fn content_is_loaded_once_per_field() {
        let mut loader = MockContentLoader::new();
        loader
            .expect_load()
            .withf(|query| query.conditions()[0].1 == "low")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    ContentRow::new()
                        .with("variableName", "low")
                        .with("rangeFrom", "1")
                        .with("rangeTo", "10"),
                ])
            });
        loader
            .expect_load()
            .withf(|query| query.conditions()[0].1 == "high")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    ContentRow::new()
                        .with("variableName", "high")
                        .with("rangeFrom", "100"),
                ])
            });

        let result = Validator::new(loader).validate(&limits()).unwrap();
        let errors = result.get_error::<Limits>().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "high too small");
    }

    #[test]
    fn parameterless_directives_never_touch_content() {
        struct Plain {
            label: String,
        }

        impl Validatable for Plain {
            fn content_mapping(&self) -> Option<&str> {
                Some("plain")
            }

            fn fields(&self) -> Vec<Field<'_>> {
                vec![Field::new("label", &self.label).with(Directive::non_blank())]
            }
        }

        let mut loader = MockContentLoader::new();
        loader.expect_load().never();

        let result = Validator::new(loader)
            .validate(&Plain {
                label: "ok".into(),
            })
            .unwrap();
        assert!(!result.has_error());
    }

    #[test]
    fn default_validator_rejects_content_lookups() {
        let err = Validator::default().validate(&limits()).unwrap_err();
        assert!(err.to_string().contains("content/envali/limits.json"));
    }

    #[test]
    fn collection_policy_is_configurable() {
        let validator = Validator::default().with_collection_policy(CollectionPolicy::AggregateAll);
        assert_eq!(validator.collection_policy(), CollectionPolicy::AggregateAll);
        assert_eq!(
            Validator::default().collection_policy(),
            CollectionPolicy::StopAtFirst
        );
    }
}
