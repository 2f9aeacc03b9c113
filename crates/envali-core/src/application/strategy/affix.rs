use crate::application::ports::ContentAttribute;
use crate::application::strategy::{StrategyContext, ValidationStrategy};
use crate::domain::BusinessError;
use crate::error::EnvaliResult;

/// Prefix or suffix check. Content wins over the literal when the entity
/// has a mapping; a missing literal means the empty string.
pub(crate) enum Affix<'p> {
    Prefix(Option<&'p str>),
    Suffix(Option<&'p str>),
}

impl ValidationStrategy for Affix<'_> {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        let (literal, attribute) = match self {
            Self::Prefix(literal) => (*literal, ContentAttribute::StartWith),
            Self::Suffix(literal) => (*literal, ContentAttribute::EndWith),
        };

        let affix = if cx.resolver.has_mapping() {
            cx.resolver.content(attribute)?.to_owned()
        } else {
            literal.unwrap_or_default().to_owned()
        };

        let passed = cx.field.value().as_str().is_some_and(|value| match self {
            Self::Prefix(_) => value.starts_with(affix.as_str()),
            Self::Suffix(_) => value.ends_with(affix.as_str()),
        });
        cx.classify(passed)
    }
}
