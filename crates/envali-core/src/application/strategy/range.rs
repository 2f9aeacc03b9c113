use std::cmp::Ordering;

use crate::application::ports::ContentAttribute;
use crate::application::strategy::{StrategyContext, ValidationStrategy};
use crate::domain::{Bound, BusinessError, FieldValue, Numeric};
use crate::error::EnvaliResult;

/// One side of an inclusive range.
pub(crate) enum Limit<'p> {
    /// This side is not part of the directive.
    Unchecked,
    /// Checked against the content row, the literal, or the width's limit,
    /// in that order.
    Checked(Option<&'p Bound>),
}

pub(crate) struct Range<'p> {
    pub(crate) lower: Limit<'p>,
    pub(crate) upper: Limit<'p>,
}

impl Range<'_> {
    /// Compare in `T` itself; values are never widened.
    fn check<T: Numeric>(
        &self,
        cx: &mut StrategyContext<'_, '_, '_>,
        value: Option<T>,
    ) -> EnvaliResult<bool> {
        let lower = resolve::<T>(cx, &self.lower, ContentAttribute::RangeFrom, "from", T::MIN)?;
        let upper = resolve::<T>(cx, &self.upper, ContentAttribute::RangeTo, "to", T::MAX)?;

        let Some(value) = value else {
            return Ok(false);
        };
        let at_least = lower.is_none_or(|lo| {
            matches!(value.partial_cmp(&lo), Some(Ordering::Greater | Ordering::Equal))
        });
        let at_most = upper.is_none_or(|hi| {
            matches!(value.partial_cmp(&hi), Some(Ordering::Less | Ordering::Equal))
        });
        Ok(at_least && at_most)
    }
}

fn resolve<T: Numeric>(
    cx: &mut StrategyContext<'_, '_, '_>,
    limit: &Limit<'_>,
    attribute: ContentAttribute,
    parameter: &'static str,
    default: T,
) -> EnvaliResult<Option<T>> {
    let Limit::Checked(literal) = limit else {
        return Ok(None);
    };

    if cx.resolver.has_mapping() {
        let raw = cx.resolver.content(attribute)?.to_owned();
        let parsed = raw.trim().parse::<T>().map_err(|_| {
            cx.invalid_parameter(parameter, &raw, format!("not a valid {}", T::FIELD_TYPE))
        })?;
        // NaN is the only value not equal to itself
        if parsed.partial_cmp(&parsed).is_none() {
            return Err(cx
                .invalid_parameter(parameter, &raw, "not a number")
                .into());
        }
        return Ok(Some(parsed));
    }

    match literal {
        Some(bound) => T::from_bound(**bound)
            .map(Some)
            .map_err(|mismatch| cx.invalid_parameter(parameter, bound, mismatch.to_string()).into()),
        None => Ok(Some(default)),
    }
}

impl ValidationStrategy for Range<'_> {
    fn validate(&self, cx: &mut StrategyContext<'_, '_, '_>) -> EnvaliResult<BusinessError> {
        let field = cx.field;
        let passed = match field.value() {
            FieldValue::I8(v) => self.check(cx, *v)?,
            FieldValue::I16(v) => self.check(cx, *v)?,
            FieldValue::I32(v) => self.check(cx, *v)?,
            FieldValue::I64(v) => self.check(cx, *v)?,
            FieldValue::F32(v) => self.check(cx, *v)?,
            FieldValue::F64(v) => self.check(cx, *v)?,
            _ => false,
        };
        cx.classify(passed)
    }
}
