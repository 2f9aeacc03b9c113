use crate::application::strategy::{StrategyContext, ValidationStrategy};
use crate::domain::{BusinessError, FieldValue, Numeric};
use crate::error::EnvaliResult;

/// Strict sign checks; zero, null and NaN fail both.
pub(crate) enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn holds<T: Numeric>(&self, value: Option<T>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            Self::Positive => value > T::ZERO,
            Self::Negative => value < T::ZERO,
        }
    }
}

impl ValidationStrategy for Sign {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        let passed = match cx.field.value() {
            FieldValue::I8(v) => self.holds(*v),
            FieldValue::I16(v) => self.holds(*v),
            FieldValue::I32(v) => self.holds(*v),
            FieldValue::I64(v) => self.holds(*v),
            FieldValue::F32(v) => self.holds(*v),
            FieldValue::F64(v) => self.holds(*v),
            _ => false,
        };
        cx.classify(passed)
    }
}
