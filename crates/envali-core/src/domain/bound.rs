//! Literal range bounds and per-width numeric comparison.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::field::FieldType;

/// A literal bound attached to a range directive.
///
/// Bounds are converted into the field's own width before comparison, so an
/// `i8` field is compared as `i8` and an `f32` field as `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! integer_bound {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Bound {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_bound!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Bound {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Why a literal bound cannot be used on a field of a given width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundMismatch {
    #[error("does not fit the field's {0} width")]
    OutOfRange(FieldType),

    #[error("fractional literal on an integer field")]
    Fractional,

    #[error("not exactly representable as {0}")]
    Inexact(FieldType),
}

/// A numeric field width the range and sign directives can compare in.
pub trait Numeric: Copy + PartialOrd + fmt::Display + FromStr {
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;
    const FIELD_TYPE: FieldType;

    /// Convert a literal bound into this width.
    ///
    /// Integral float literals such as `10.0` are accepted on integer
    /// widths; fractional ones are not. Integer literals on float widths
    /// must convert without rounding.
    fn from_bound(bound: Bound) -> Result<Self, BoundMismatch>;
}

macro_rules! integer_numeric {
    ($($ty:ty => $field:ident),*) => {
        $(
            impl Numeric for $ty {
                const MIN: Self = <$ty>::MIN;
                const MAX: Self = <$ty>::MAX;
                const ZERO: Self = 0;
                const FIELD_TYPE: FieldType = FieldType::$field;

                fn from_bound(bound: Bound) -> Result<Self, BoundMismatch> {
                    let out_of_range = BoundMismatch::OutOfRange(Self::FIELD_TYPE);
                    match bound {
                        Bound::Integer(v) => <$ty>::try_from(v).map_err(|_| out_of_range),
                        Bound::Float(v) if !v.is_finite() => Err(out_of_range),
                        Bound::Float(v) if v.fract() != 0.0 => Err(BoundMismatch::Fractional),
                        // MIN is a power of two, so both ends are exact in f64
                        Bound::Float(v) if v >= <$ty>::MIN as f64 && v < -(<$ty>::MIN as f64) => {
                            Ok(v as $ty)
                        }
                        Bound::Float(_) => Err(out_of_range),
                    }
                }
            }
        )*
    };
}

integer_numeric!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);

macro_rules! float_numeric {
    ($($ty:ty => $field:ident),*) => {
        $(
            impl Numeric for $ty {
                const MIN: Self = <$ty>::MIN;
                const MAX: Self = <$ty>::MAX;
                const ZERO: Self = 0.0;
                const FIELD_TYPE: FieldType = FieldType::$field;

                fn from_bound(bound: Bound) -> Result<Self, BoundMismatch> {
                    match bound {
                        Bound::Integer(v) => {
                            let converted = v as $ty;
                            if converted as i128 == i128::from(v) {
                                Ok(converted)
                            } else {
                                Err(BoundMismatch::Inexact(Self::FIELD_TYPE))
                            }
                        }
                        Bound::Float(v) => {
                            let converted = v as $ty;
                            if converted.is_finite() {
                                Ok(converted)
                            } else {
                                Err(BoundMismatch::OutOfRange(Self::FIELD_TYPE))
                            }
                        }
                    }
                }
            }
        )*
    };
}

float_numeric!(f32 => F32, f64 => F64);
