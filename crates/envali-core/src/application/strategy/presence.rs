use crate::application::strategy::{StrategyContext, ValidationStrategy};
use crate::domain::BusinessError;
use crate::error::EnvaliResult;

pub(crate) struct NonNull;

impl ValidationStrategy for NonNull {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        cx.classify(cx.field.value().is_present())
    }
}

/// At least one non-whitespace character.
pub(crate) struct NonBlank;

impl ValidationStrategy for NonBlank {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        let passed = cx
            .field
            .value()
            .as_str()
            .is_some_and(|s| s.chars().any(|c| !c.is_whitespace()));
        cx.classify(passed)
    }
}

/// String length or element count above zero.
pub(crate) struct NonEmpty;

impl ValidationStrategy for NonEmpty {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        cx.classify(cx.field.value().size().is_some_and(|size| size > 0))
    }
}
