//! Directive dispatch.
//!
//! Looks a directive up in the catalog, guards the field type, and runs the
//! matching strategy. Uncataloged kinds are skipped without error.

use tracing::{debug, trace};

use crate::application::resolver::ParameterResolver;
use crate::application::services::validator::Walk;
use crate::application::strategy::{self, StrategyContext};
use crate::domain::{BusinessError, Directive, DomainError, EntityType, Field, find_directive};
use crate::error::EnvaliResult;

/// One field of one entity, ready to have its directives dispatched.
pub(crate) struct DispatchContext<'s, 'r, 'w> {
    pub(crate) walk: &'s mut Walk<'w>,
    pub(crate) entity_type: EntityType,
    pub(crate) field: &'s Field<'s>,
    pub(crate) resolver: &'s mut ParameterResolver<'r>,
}

impl DispatchContext<'_, '_, '_> {
    pub(crate) fn dispatch(&mut self, directive: &Directive) -> EnvaliResult<BusinessError> {
        let kind = directive.kind();
        let field = self.field.qualified_name(self.entity_type);
        let Some(def) = find_directive(kind) else {
            trace!(%field, directive = %kind, "Skipping uncataloged directive");
            return Ok(BusinessError::none());
        };

        let field_type = self.field.field_type();
        if !def.supports(field_type) {
            return Err(DomainError::UnsupportedFieldType {
                directive: kind.to_string(),
                supported: def.describe_supported(),
                entity: self.entity_type.short_name().to_owned(),
                field: self.field.name().to_owned(),
                actual: self.field.value().type_name(),
            }
            .into());
        }

        let Some(strategy) = strategy::build(directive.rule()) else {
            return Ok(BusinessError::none());
        };

        let mut cx = StrategyContext {
            walk: &mut *self.walk,
            entity_type: self.entity_type,
            field: self.field,
            directive,
            resolver: &mut *self.resolver,
        };

        match strategy.validate(&mut cx) {
            Ok(outcome) => {
                debug!(
                    %field,
                    directive = %kind,
                    outcome = %outcome.kind(),
                    "Directive evaluated"
                );
                Ok(outcome)
            }
            Err(err) => {
                debug!(
                    %field,
                    directive = %kind,
                    severity = %directive.severity(),
                    error = %err,
                    "Directive aborted the pass"
                );
                Err(err)
            }
        }
    }
}
