//! Directive catalog.
//!
//! Every directive kind the validator evaluates is described exactly once by
//! a [`DirectiveDef`] in [`DIRECTIVE_CATALOG`]. Kinds that are not listed
//! (including every [`DirectiveKind::Custom`]) are skipped during dispatch.
//!
//! # Adding a Directive
//!
//! 1. Add a variant to `DirectiveKind` and `Rule` in `directive.rs`
//! 2. Add one [`DirectiveDef`] entry to [`DIRECTIVE_CATALOG`]
//! 3. Add its strategy to `application::strategy::build`

use crate::domain::directive::DirectiveKind;
use crate::domain::field::FieldType;

// ── Definitions ──────────────────────────────────────────────────────────────

/// Describes one cataloged directive kind.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveDef {
    pub kind: DirectiveKind,

    /// Field type categories the directive may be attached to.
    ///
    /// Attaching it to any other category is a usage error.
    pub supported_types: &'static [FieldType],
}

impl DirectiveDef {
    pub fn supports(&self, field_type: FieldType) -> bool {
        self.supported_types.contains(&field_type)
    }

    /// Human-readable list of the supported categories, e.g. `String`.
    pub fn describe_supported(&self) -> String {
        if self.supported_types == FieldType::ALL {
            return "any".to_owned();
        }
        self.supported_types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

const STRING_ONLY: &[FieldType] = &[FieldType::String];

const SIZED: &[FieldType] = &[
    FieldType::String,
    FieldType::Array,
    FieldType::List,
    FieldType::Map,
    FieldType::Set,
];

const NESTABLE: &[FieldType] = &[
    FieldType::Entity,
    FieldType::Array,
    FieldType::List,
    FieldType::Map,
    FieldType::Set,
];

/// Single source of truth for directive applicability.
pub static DIRECTIVE_CATALOG: &[DirectiveDef] = &[
    // ── Presence ─────────────────────────────────────────────────────────────
    DirectiveDef {
        kind: DirectiveKind::RequireNonNull,
        supported_types: FieldType::ALL,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireNonBlank,
        supported_types: STRING_ONLY,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireNonEmpty,
        supported_types: SIZED,
    },
    // ── Numbers ──────────────────────────────────────────────────────────────
    DirectiveDef {
        kind: DirectiveKind::RequirePositive,
        supported_types: FieldType::NUMERIC,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireNegative,
        supported_types: FieldType::NUMERIC,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireRangeFrom,
        supported_types: FieldType::NUMERIC,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireRangeTo,
        supported_types: FieldType::NUMERIC,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireRangeFromTo,
        supported_types: FieldType::NUMERIC,
    },
    // ── Strings ──────────────────────────────────────────────────────────────
    DirectiveDef {
        kind: DirectiveKind::RequireStartWith,
        supported_types: STRING_ONLY,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireEndWith,
        supported_types: STRING_ONLY,
    },
    DirectiveDef {
        kind: DirectiveKind::RequireMatch,
        supported_types: STRING_ONLY,
    },
    // ── Nesting ──────────────────────────────────────────────────────────────
    DirectiveDef {
        kind: DirectiveKind::NestedEntity,
        supported_types: NESTABLE,
    },
];

// ── Lookup ───────────────────────────────────────────────────────────────────

/// Look up a directive kind. Returns `None` for uncataloged kinds.
pub fn find_directive(kind: DirectiveKind) -> Option<&'static DirectiveDef> {
    DIRECTIVE_CATALOG.iter().find(|def| def.kind == kind)
}

/// Structural checks on the catalog.
///
/// Panics on duplicate kinds, cataloged custom kinds, or empty
/// supported-type sets.
#[doc(hidden)]
pub fn assert_catalog_integrity() {
    for (index, def) in DIRECTIVE_CATALOG.iter().enumerate() {
        assert!(
            !matches!(def.kind, DirectiveKind::Custom(_)),
            "Custom kind {:?} must not be cataloged",
            def.kind
        );
        assert!(
            !def.supported_types.is_empty(),
            "{} supports no field types",
            def.kind
        );
        assert!(
            DIRECTIVE_CATALOG[..index].iter().all(|d| d.kind != def.kind),
            "{} is cataloged twice",
            def.kind
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supports(kind: DirectiveKind, field_type: FieldType) -> bool {
        find_directive(kind).is_some_and(|def| def.supports(field_type))
    }

    #[test]
    fn catalog_integrity() {
        assert_catalog_integrity();
    }

    #[test]
    fn catalog_covers_every_builtin_kind() {
        let kinds = [
            DirectiveKind::RequireNonNull,
            DirectiveKind::RequireNonBlank,
            DirectiveKind::RequirePositive,
            DirectiveKind::RequireNegative,
            DirectiveKind::RequireRangeFrom,
            DirectiveKind::RequireRangeTo,
            DirectiveKind::RequireRangeFromTo,
            DirectiveKind::RequireStartWith,
            DirectiveKind::RequireEndWith,
            DirectiveKind::RequireNonEmpty,
            DirectiveKind::RequireMatch,
            DirectiveKind::NestedEntity,
        ];
        for kind in kinds {
            assert!(find_directive(kind).is_some(), "{kind} missing");
        }
    }

    #[test]
    fn custom_kinds_are_not_cataloged() {
        assert!(find_directive(DirectiveKind::Custom("RequireUuid")).is_none());
    }

    #[test]
    fn non_null_supports_everything() {
        for &ty in FieldType::ALL {
            assert!(supports(DirectiveKind::RequireNonNull, ty));
        }
    }

    #[test]
    fn non_blank_supports_only_strings() {
        assert!(supports(DirectiveKind::RequireNonBlank, FieldType::String));
        assert!(!supports(DirectiveKind::RequireNonBlank, FieldType::I32));
        assert!(!supports(DirectiveKind::RequireNonBlank, FieldType::List));
    }

    #[test]
    fn ranges_support_every_numeric_width() {
        for &ty in FieldType::NUMERIC {
            assert!(supports(DirectiveKind::RequireRangeFromTo, ty));
            assert!(supports(DirectiveKind::RequirePositive, ty));
        }
        assert!(!supports(DirectiveKind::RequireRangeFrom, FieldType::String));
    }

    #[test]
    fn nested_rejects_scalars() {
        assert!(supports(DirectiveKind::NestedEntity, FieldType::Map));
        assert!(!supports(DirectiveKind::NestedEntity, FieldType::String));
    }

    #[test]
    fn describe_supported_lists_categories() {
        let non_empty = find_directive(DirectiveKind::RequireNonEmpty).map(|d| d.describe_supported());
        assert_eq!(non_empty.as_deref(), Some("String, array, list, map, set"));

        let non_null = find_directive(DirectiveKind::RequireNonNull).map(|d| d.describe_supported());
        assert_eq!(non_null.as_deref(), Some("any"));
    }
}
