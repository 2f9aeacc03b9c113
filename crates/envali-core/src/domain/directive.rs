//! Directives: a rule, its severity, and the message reported on failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::bound::Bound;
use crate::domain::pattern::{PatternSpec, RegexPreset};

/// What happens when a directive's predicate fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Abort the whole validation pass with an error.
    #[default]
    FailFast,
    /// Record a recoverable business error and continue.
    Recoverable,
    /// Record an unrecoverable business error and continue.
    Unrecoverable,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail-fast"),
            Self::Recoverable => write!(f, "recoverable"),
            Self::Unrecoverable => write!(f, "unrecoverable"),
        }
    }
}

/// Kind of a directive, without its parameters.
///
/// `Custom` kinds are never cataloged, so the validator skips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    RequireNonNull,
    RequireNonBlank,
    RequirePositive,
    RequireNegative,
    RequireRangeFrom,
    RequireRangeTo,
    RequireRangeFromTo,
    RequireStartWith,
    RequireEndWith,
    RequireNonEmpty,
    RequireMatch,
    NestedEntity,
    Custom(&'static str),
}

impl DirectiveKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::RequireNonNull => "RequireNonNull",
            Self::RequireNonBlank => "RequireNonBlank",
            Self::RequirePositive => "RequirePositive",
            Self::RequireNegative => "RequireNegative",
            Self::RequireRangeFrom => "RequireRangeFrom",
            Self::RequireRangeTo => "RequireRangeTo",
            Self::RequireRangeFromTo => "RequireRangeFromTo",
            Self::RequireStartWith => "RequireStartWith",
            Self::RequireEndWith => "RequireEndWith",
            Self::RequireNonEmpty => "RequireNonEmpty",
            Self::RequireMatch => "RequireMatch",
            Self::NestedEntity => "NestedEntity",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The check a directive performs, with its literal parameters.
///
/// `None` literals mean "not given": range bounds then default to the
/// field width's limits, prefixes and suffixes to the empty string. When
/// the entity declares a content mapping, range and affix rules read their
/// parameters from the content row instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    NonNull,
    NonBlank,
    Positive,
    Negative,
    RangeFrom { from: Option<Bound> },
    RangeTo { to: Option<Bound> },
    RangeFromTo { from: Option<Bound>, to: Option<Bound> },
    StartWith { prefix: Option<String> },
    EndWith { suffix: Option<String> },
    NonEmpty,
    Match(PatternSpec),
    Nested,
    Custom(&'static str),
}

impl Rule {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Self::NonNull => DirectiveKind::RequireNonNull,
            Self::NonBlank => DirectiveKind::RequireNonBlank,
            Self::Positive => DirectiveKind::RequirePositive,
            Self::Negative => DirectiveKind::RequireNegative,
            Self::RangeFrom { .. } => DirectiveKind::RequireRangeFrom,
            Self::RangeTo { .. } => DirectiveKind::RequireRangeTo,
            Self::RangeFromTo { .. } => DirectiveKind::RequireRangeFromTo,
            Self::StartWith { .. } => DirectiveKind::RequireStartWith,
            Self::EndWith { .. } => DirectiveKind::RequireEndWith,
            Self::NonEmpty => DirectiveKind::RequireNonEmpty,
            Self::Match(_) => DirectiveKind::RequireMatch,
            Self::Nested => DirectiveKind::NestedEntity,
            Self::Custom(name) => DirectiveKind::Custom(name),
        }
    }
}

/// A validation requirement attached to one field.
///
/// Directives default to [`Severity::FailFast`] with an empty message.
///
/// ```rust
/// use envali_core::domain::{Directive, Severity};
///
/// let directive = Directive::range(0, 10).recoverable("count must be 0..=10");
/// assert_eq!(directive.severity(), Severity::Recoverable);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    rule: Rule,
    severity: Severity,
    message: String,
}

impl Directive {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            severity: Severity::default(),
            message: String::new(),
        }
    }

    // ── Constructors ─────────────────────────────────────────────────────────

    pub fn non_null() -> Self {
        Self::new(Rule::NonNull)
    }

    pub fn non_blank() -> Self {
        Self::new(Rule::NonBlank)
    }

    pub fn positive() -> Self {
        Self::new(Rule::Positive)
    }

    pub fn negative() -> Self {
        Self::new(Rule::Negative)
    }

    /// Inclusive lower bound.
    pub fn range_from(from: impl Into<Bound>) -> Self {
        Self::new(Rule::RangeFrom {
            from: Some(from.into()),
        })
    }

    /// Inclusive upper bound.
    pub fn range_to(to: impl Into<Bound>) -> Self {
        Self::new(Rule::RangeTo {
            to: Some(to.into()),
        })
    }

    /// Inclusive lower and upper bounds.
    pub fn range(from: impl Into<Bound>, to: impl Into<Bound>) -> Self {
        Self::new(Rule::RangeFromTo {
            from: Some(from.into()),
            to: Some(to.into()),
        })
    }

    pub fn start_with(prefix: impl Into<String>) -> Self {
        Self::new(Rule::StartWith {
            prefix: Some(prefix.into()),
        })
    }

    pub fn end_with(suffix: impl Into<String>) -> Self {
        Self::new(Rule::EndWith {
            suffix: Some(suffix.into()),
        })
    }

    pub fn non_empty() -> Self {
        Self::new(Rule::NonEmpty)
    }

    pub fn matching(spec: PatternSpec) -> Self {
        Self::new(Rule::Match(spec))
    }

    /// Full match against a literal expression.
    pub fn matches(expression: impl Into<String>) -> Self {
        Self::matching(PatternSpec::expression(expression))
    }

    /// Full match against a preset.
    pub fn preset(preset: RegexPreset) -> Self {
        Self::matching(PatternSpec::preset(preset))
    }

    pub fn nested() -> Self {
        Self::new(Rule::Nested)
    }

    /// A directive kind this validator does not know; it is skipped.
    pub fn custom(name: &'static str) -> Self {
        Self::new(Rule::Custom(name))
    }

    // ── Severity ─────────────────────────────────────────────────────────────

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn fail_fast(self, message: impl Into<String>) -> Self {
        self.with_severity(Severity::FailFast).with_message(message)
    }

    pub fn recoverable(self, message: impl Into<String>) -> Self {
        self.with_severity(Severity::Recoverable).with_message(message)
    }

    pub fn unrecoverable(self, message: impl Into<String>) -> Self {
        self.with_severity(Severity::Unrecoverable)
            .with_message(message)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn kind(&self) -> DirectiveKind {
        self.rule.kind()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fail_fast_with_empty_message() {
        let directive = Directive::non_null();
        assert_eq!(directive.severity(), Severity::FailFast);
        assert_eq!(directive.message(), "");
    }

    #[test]
    fn severity_builders_set_message() {
        let directive = Directive::positive().unrecoverable("must be positive");
        assert_eq!(directive.severity(), Severity::Unrecoverable);
        assert_eq!(directive.message(), "must be positive");
    }

    #[test]
    fn kind_follows_rule() {
        assert_eq!(Directive::range(0, 1).kind(), DirectiveKind::RequireRangeFromTo);
        assert_eq!(Directive::range_to(1).kind(), DirectiveKind::RequireRangeTo);
        assert_eq!(
            Directive::preset(RegexPreset::Numeric).kind(),
            DirectiveKind::RequireMatch
        );
        assert_eq!(
            Directive::custom("RequireUuid").kind(),
            DirectiveKind::Custom("RequireUuid")
        );
    }

    #[test]
    fn literal_bounds_are_kept() {
        match Directive::range(-10, 2.5).rule() {
            Rule::RangeFromTo { from, to } => {
                assert_eq!(*from, Some(Bound::Integer(-10)));
                assert_eq!(*to, Some(Bound::Float(2.5)));
            }
            other => panic!("unexpected rule {other:?}"),
        }
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::FailFast.to_string(), "fail-fast");
        assert_eq!(Severity::Unrecoverable.to_string(), "unrecoverable");
    }
}
