use crate::application::services::validator::CollectionPolicy;
use crate::application::strategy::{StrategyContext, ValidationStrategy};
use crate::domain::{BusinessError, FieldValue, ValidationResult};
use crate::error::EnvaliResult;

/// Re-validates the entity (or entities) held by the field in place.
pub(crate) struct Nested;

impl ValidationStrategy for Nested {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        let field = cx.field;
        let result = match field.value() {
            FieldValue::Entity(None) => ValidationResult::none(),
            FieldValue::Entity(Some(child)) => cx.walk.entity(*child)?,
            FieldValue::Array(elements)
            | FieldValue::List(elements)
            | FieldValue::Map(elements)
            | FieldValue::Set(elements) => {
                let Some(elements) = elements else {
                    return Ok(BusinessError::none());
                };
                let Some(children) = elements.as_entities() else {
                    return Err(cx.not_validatable().into());
                };

                let mut merged = ValidationResult::none();
                for &child in children {
                    let child_result = cx.walk.entity(child)?;
                    if !child_result.has_error() {
                        continue;
                    }
                    merged.merge(&child_result);
                    if cx.walk.policy() == CollectionPolicy::StopAtFirst {
                        break;
                    }
                }
                merged
            }
            _ => return Err(cx.not_validatable().into()),
        };

        if result.has_error() {
            Ok(BusinessError::nested(result))
        } else {
            Ok(BusinessError::none())
        }
    }
}
