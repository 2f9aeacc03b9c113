use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::application::ports::ContentAttribute;
use crate::application::strategy::{StrategyContext, ValidationStrategy};
use crate::domain::{BusinessError, DomainError, PatternSpec, RegexMethod, RegexModifier};
use crate::error::EnvaliResult;

pub(crate) struct Pattern<'p> {
    pub(crate) spec: &'p PatternSpec,
}

impl Pattern<'_> {
    /// Preset, then literal expression, then the content row.
    fn source(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<String> {
        if let Some(pattern) = self.spec.preset_value().pattern() {
            return Ok(pattern);
        }
        if let Some(expression) = self.spec.expression_value() {
            return Ok(expression.to_owned());
        }
        if cx.resolver.has_mapping() {
            return Ok(cx.resolver.content(ContentAttribute::Regex)?.to_owned());
        }
        Err(cx.missing_parameter("expression").into())
    }
}

impl ValidationStrategy for Pattern<'_> {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        let source = self.source(cx)?;
        let regex = compile_pattern(&source, self.spec).map_err(|err| DomainError::InvalidPattern {
            entity: cx.entity_name(),
            field: cx.field.name().to_owned(),
            pattern: source.clone(),
            reason: err.to_string(),
        })?;
        trace!(pattern = regex.as_str(), "Pattern compiled");

        let required = self
            .spec
            .preset_value()
            .required_classes()
            .iter()
            .map(|class| Regex::new(class))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| DomainError::InvalidPattern {
                entity: cx.entity_name(),
                field: cx.field.name().to_owned(),
                pattern: source.clone(),
                reason: err.to_string(),
            })?;

        let passed = cx.field.value().as_str().is_some_and(|value| {
            regex.is_match(value) && required.iter().all(|class| class.is_match(value))
        });
        cx.classify(passed)
    }
}

/// Compile `pattern` with the spec's modifiers, anchored for its method.
///
/// `Matches` requires the whole input to match, `LookingAt` a match at the
/// start, `Find` a match anywhere.
pub fn compile_pattern(pattern: &str, spec: &PatternSpec) -> Result<Regex, regex::Error> {
    let mut body = if spec.has_modifier(RegexModifier::Literal) {
        regex::escape(pattern)
    } else {
        pattern.to_owned()
    };
    // A trailing `#` comment must not swallow the closing group
    if spec.has_modifier(RegexModifier::Comments) {
        body.push('\n');
    }

    let anchored = match spec.method() {
        RegexMethod::Matches => format!(r"\A(?:{body})\z"),
        RegexMethod::LookingAt => format!(r"\A(?:{body})"),
        RegexMethod::Find => body,
    };

    RegexBuilder::new(&anchored)
        .case_insensitive(spec.has_modifier(RegexModifier::CaseInsensitive))
        .multi_line(spec.has_modifier(RegexModifier::Multiline))
        .dot_matches_new_line(spec.has_modifier(RegexModifier::DotMatchesAll))
        .ignore_whitespace(spec.has_modifier(RegexModifier::Comments))
        .build()
}
