//! Validation strategies, one per cataloged directive kind.
//!
//! A strategy resolves its parameters, evaluates its predicate and hands the
//! outcome to [`StrategyContext::classify`], which applies the directive's
//! severity. The field type has already been checked against the catalog
//! when a strategy runs.

mod affix;
mod nested;
mod pattern;
mod presence;
mod range;
mod sign;

pub use pattern::compile_pattern;

use crate::application::resolver::ParameterResolver;
use crate::application::services::validator::Walk;
use crate::domain::{
    BusinessError, Directive, DomainError, EntityType, Field, Rule, Severity,
};
use crate::error::EnvaliResult;

/// Everything a strategy may look at while evaluating one directive.
pub(crate) struct StrategyContext<'s, 'r, 'w> {
    pub(crate) walk: &'s mut Walk<'w>,
    pub(crate) entity_type: EntityType,
    pub(crate) field: &'s Field<'s>,
    pub(crate) directive: &'s Directive,
    pub(crate) resolver: &'s mut ParameterResolver<'r>,
}

impl StrategyContext<'_, '_, '_> {
    /// Turn a predicate outcome into a business error according to the
    /// directive's severity. Fail-fast failures abort the pass.
    pub(crate) fn classify(&self, passed: bool) -> EnvaliResult<BusinessError> {
        if passed {
            return Ok(BusinessError::none());
        }
        let message = self.directive.message();
        match self.directive.severity() {
            Severity::FailFast => Err(DomainError::FailFast {
                directive: self.directive.kind().to_string(),
                entity: self.entity_name(),
                field: self.field.name().to_owned(),
                message: message.to_owned(),
            }
            .into()),
            Severity::Recoverable => Ok(BusinessError::recoverable(message)),
            Severity::Unrecoverable => Ok(BusinessError::unrecoverable(message)),
        }
    }

    pub(crate) fn entity_name(&self) -> String {
        self.entity_type.short_name().to_owned()
    }

    pub(crate) fn invalid_parameter(
        &self,
        parameter: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> DomainError {
        DomainError::InvalidParameter {
            directive: self.directive.kind().to_string(),
            entity: self.entity_name(),
            field: self.field.name().to_owned(),
            parameter,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_parameter(&self, parameter: &'static str) -> DomainError {
        DomainError::MissingParameter {
            directive: self.directive.kind().to_string(),
            entity: self.entity_name(),
            field: self.field.name().to_owned(),
            parameter,
        }
    }

    pub(crate) fn not_validatable(&self) -> DomainError {
        DomainError::NotValidatable {
            entity: self.entity_name(),
            field: self.field.name().to_owned(),
            actual: self.field.value().type_name(),
        }
    }
}

pub(crate) trait ValidationStrategy {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError>;
}

/// The strategy for `rule`, or `None` for custom kinds.
pub(crate) fn build(rule: &Rule) -> Option<Box<dyn ValidationStrategy + '_>> {
    let strategy: Box<dyn ValidationStrategy + '_> = match rule {
        Rule::NonNull => Box::new(presence::NonNull),
        Rule::NonBlank => Box::new(presence::NonBlank),
        Rule::NonEmpty => Box::new(presence::NonEmpty),
        Rule::Positive => Box::new(sign::Sign::Positive),
        Rule::Negative => Box::new(sign::Sign::Negative),
        Rule::RangeFrom { from } => Box::new(range::Range {
            lower: range::Limit::Checked(from.as_ref()),
            upper: range::Limit::Unchecked,
        }),
        Rule::RangeTo { to } => Box::new(range::Range {
            lower: range::Limit::Unchecked,
            upper: range::Limit::Checked(to.as_ref()),
        }),
        Rule::RangeFromTo { from, to } => Box::new(range::Range {
            lower: range::Limit::Checked(from.as_ref()),
            upper: range::Limit::Checked(to.as_ref()),
        }),
        Rule::StartWith { prefix } => Box::new(affix::Affix::Prefix(prefix.as_deref())),
        Rule::EndWith { suffix } => Box::new(affix::Affix::Suffix(suffix.as_deref())),
        Rule::Match(spec) => Box::new(pattern::Pattern { spec }),
        Rule::Nested => Box::new(nested::Nested),
        Rule::Custom(_) => return None,
    };
    Some(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DIRECTIVE_CATALOG, DirectiveKind, PatternSpec};

    fn sample(kind: DirectiveKind) -> Rule {
        match kind {
            DirectiveKind::RequireNonNull => Rule::NonNull,
            DirectiveKind::RequireNonBlank => Rule::NonBlank,
            DirectiveKind::RequirePositive => Rule::Positive,
            DirectiveKind::RequireNegative => Rule::Negative,
            DirectiveKind::RequireRangeFrom => Rule::RangeFrom { from: None },
            DirectiveKind::RequireRangeTo => Rule::RangeTo { to: None },
            DirectiveKind::RequireRangeFromTo => Rule::RangeFromTo { from: None, to: None },
            DirectiveKind::RequireStartWith => Rule::StartWith { prefix: None },
            DirectiveKind::RequireEndWith => Rule::EndWith { suffix: None },
            DirectiveKind::RequireNonEmpty => Rule::NonEmpty,
            DirectiveKind::RequireMatch => Rule::Match(PatternSpec::from_content()),
            DirectiveKind::NestedEntity => Rule::Nested,
            DirectiveKind::Custom(name) => Rule::Custom(name),
        }
    }

    #[test]
    fn every_cataloged_kind_has_a_strategy() {
        for def in DIRECTIVE_CATALOG {
            let rule = sample(def.kind);
            assert_eq!(rule.kind(), def.kind);
            assert!(build(&rule).is_some(), "{} has no strategy", def.kind);
        }
    }

    #[test]
    fn custom_rules_have_no_strategy() {
        assert!(build(&Rule::Custom("RequireUuid")).is_none());
    }
}
