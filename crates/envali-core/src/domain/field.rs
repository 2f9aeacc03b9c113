//! Field descriptors and typed value access.
//!
//! A [`Field`] is the only place where the validator touches entity storage.
//! Each field carries a [`FieldValue`] whose variant fixes the declared
//! [`FieldType`] category, so strategies never have to guess at types.

use std::fmt;

use crate::domain::directive::Directive;
use crate::domain::entity::{EntityType, Validatable};

// ── Type categories ──────────────────────────────────────────────────────────

/// Declared type category of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Array,
    List,
    Map,
    Set,
    Entity,
    Other,
}

impl FieldType {
    /// Every numeric width, narrowest integer first.
    pub const NUMERIC: &'static [FieldType] = &[
        FieldType::I8,
        FieldType::I16,
        FieldType::I32,
        FieldType::I64,
        FieldType::F32,
        FieldType::F64,
    ];

    /// Every category, used by directives that apply to any field.
    pub const ALL: &'static [FieldType] = &[
        FieldType::String,
        FieldType::I8,
        FieldType::I16,
        FieldType::I32,
        FieldType::I64,
        FieldType::F32,
        FieldType::F64,
        FieldType::Bool,
        FieldType::Array,
        FieldType::List,
        FieldType::Map,
        FieldType::Set,
        FieldType::Entity,
        FieldType::Other,
    ];
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "String",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Array => "array",
            Self::List => "list",
            Self::Map => "map",
            Self::Set => "set",
            Self::Entity => "entity",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

// ── Collection elements ──────────────────────────────────────────────────────

/// View over the elements of an array or collection field.
///
/// Elements are only exposed as entities when the element type is itself
/// [`Validatable`]; otherwise only the size is known.
#[derive(Clone)]
pub struct Elements<'a> {
    len: usize,
    element_type: &'static str,
    entities: Option<Vec<&'a dyn Validatable>>,
}

impl<'a> Elements<'a> {
    /// Elements of a type the validator cannot descend into.
    pub fn values<T: 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Self {
            len: items.into_iter().count(),
            element_type: std::any::type_name::<T>(),
            entities: None,
        }
    }

    /// Elements that are validatable entities, in iteration order.
    pub fn entities<T: Validatable>(items: impl IntoIterator<Item = &'a T>) -> Self {
        let entities: Vec<&'a dyn Validatable> = items
            .into_iter()
            .map(|item| item as &'a dyn Validatable)
            .collect();
        Self {
            len: entities.len(),
            element_type: std::any::type_name::<T>(),
            entities: Some(entities),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn element_type(&self) -> &'static str {
        self.element_type
    }

    /// The elements as entities, or `None` when the element type is not
    /// validatable.
    pub fn as_entities(&self) -> Option<&[&'a dyn Validatable]> {
        self.entities.as_deref()
    }
}

impl fmt::Debug for Elements<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elements")
            .field("len", &self.len)
            .field("element_type", &self.element_type)
            .field("validatable", &self.entities.is_some())
            .finish()
    }
}

// ── Values ───────────────────────────────────────────────────────────────────

/// Typed view of one field's current value. `None` stands for null.
#[derive(Clone)]
pub enum FieldValue<'a> {
    Str(Option<&'a str>),
    I8(Option<i8>),
    I16(Option<i16>),
    I32(Option<i32>),
    I64(Option<i64>),
    F32(Option<f32>),
    F64(Option<f64>),
    Bool(Option<bool>),
    Array(Option<Elements<'a>>),
    List(Option<Elements<'a>>),
    Map(Option<Elements<'a>>),
    Set(Option<Elements<'a>>),
    Entity(Option<&'a dyn Validatable>),
    Other {
        type_name: &'static str,
        present: bool,
    },
}

impl<'a> FieldValue<'a> {
    /// A single nested entity.
    pub fn entity<T: Validatable>(entity: &'a T) -> Self {
        Self::Entity(Some(entity))
    }

    /// An optional nested entity.
    pub fn optional_entity<T: Validatable>(entity: Option<&'a T>) -> Self {
        Self::Entity(entity.map(|e| e as &'a dyn Validatable))
    }

    /// A fixed-size array of plain values.
    pub fn array<T: 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Self::Array(Some(Elements::values(items)))
    }

    /// A fixed-size array of entities.
    pub fn entity_array<T: Validatable>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Self::Array(Some(Elements::entities(items)))
    }

    /// An ordered sequence of plain values.
    pub fn list<T: 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Self::List(Some(Elements::values(items)))
    }

    /// An ordered sequence of entities.
    pub fn entity_list<T: Validatable>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Self::List(Some(Elements::entities(items)))
    }

    /// A set of plain values.
    pub fn set<T: 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Self::Set(Some(Elements::values(items)))
    }

    /// A set of entities.
    pub fn entity_set<T: Validatable>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Self::Set(Some(Elements::entities(items)))
    }

    /// A map, described by its values (pass `map.values()`).
    pub fn map<V: 'a>(values: impl IntoIterator<Item = &'a V>) -> Self {
        Self::Map(Some(Elements::values(values)))
    }

    /// A map whose values are entities (pass `map.values()`).
    pub fn entity_map<V: Validatable>(values: impl IntoIterator<Item = &'a V>) -> Self {
        Self::Map(Some(Elements::entities(values)))
    }

    /// Any other type; only presence can be checked.
    pub fn other<T: 'a>(value: Option<&'a T>) -> Self {
        Self::Other {
            type_name: std::any::type_name::<T>(),
            present: value.is_some(),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Str(_) => FieldType::String,
            Self::I8(_) => FieldType::I8,
            Self::I16(_) => FieldType::I16,
            Self::I32(_) => FieldType::I32,
            Self::I64(_) => FieldType::I64,
            Self::F32(_) => FieldType::F32,
            Self::F64(_) => FieldType::F64,
            Self::Bool(_) => FieldType::Bool,
            Self::Array(_) => FieldType::Array,
            Self::List(_) => FieldType::List,
            Self::Map(_) => FieldType::Map,
            Self::Set(_) => FieldType::Set,
            Self::Entity(_) => FieldType::Entity,
            Self::Other { .. } => FieldType::Other,
        }
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Self::Entity(Some(entity)) => entity.entity_type().short_name().to_owned(),
            Self::Array(Some(e)) | Self::List(Some(e)) | Self::Map(Some(e)) | Self::Set(Some(e)) => {
                format!("{}<{}>", self.field_type(), e.element_type())
            }
            Self::Other { type_name, .. } => (*type_name).to_owned(),
            other => other.field_type().to_string(),
        }
    }

    /// `false` when the field is null.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Str(v) => v.is_some(),
            Self::I8(v) => v.is_some(),
            Self::I16(v) => v.is_some(),
            Self::I32(v) => v.is_some(),
            Self::I64(v) => v.is_some(),
            Self::F32(v) => v.is_some(),
            Self::F64(v) => v.is_some(),
            Self::Bool(v) => v.is_some(),
            Self::Array(v) | Self::List(v) | Self::Map(v) | Self::Set(v) => v.is_some(),
            Self::Entity(v) => v.is_some(),
            Self::Other { present, .. } => *present,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Str(v) => *v,
            _ => None,
        }
    }

    /// Length of a string or element count of a collection.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Str(v) => v.map(str::len),
            Self::Array(v) | Self::List(v) | Self::Map(v) | Self::Set(v) => {
                v.as_ref().map(Elements::len)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::I8(v) => f.debug_tuple("I8").field(v).finish(),
            Self::I16(v) => f.debug_tuple("I16").field(v).finish(),
            Self::I32(v) => f.debug_tuple("I32").field(v).finish(),
            Self::I64(v) => f.debug_tuple("I64").field(v).finish(),
            Self::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Self::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Self::Set(v) => f.debug_tuple("Set").field(v).finish(),
            Self::Entity(v) => f
                .debug_tuple("Entity")
                .field(&v.map(|e| e.entity_type().name()))
                .finish(),
            Self::Other { type_name, present } => f
                .debug_struct("Other")
                .field("type_name", type_name)
                .field("present", present)
                .finish(),
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────────────

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Some(value))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(Some(value.as_str()))
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a Option<String>> for FieldValue<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Self::Str(value.as_deref())
    }
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(value: $ty) -> Self {
                    Self::$variant(Some(value))
                }
            }

            impl From<Option<$ty>> for FieldValue<'_> {
                fn from(value: Option<$ty>) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

scalar_conversions! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

// ── Field ────────────────────────────────────────────────────────────────────

/// One declared field of an entity with its attached directives.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    name: &'static str,
    value: FieldValue<'a>,
    directives: Vec<Directive>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: impl Into<FieldValue<'a>>) -> Self {
        Self {
            name,
            value: value.into(),
            directives: Vec::new(),
        }
    }

    /// Attach a directive. Directives run in the order they are attached.
    pub fn with(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> &FieldValue<'a> {
        &self.value
    }

    pub fn field_type(&self) -> FieldType {
        self.value.field_type()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// `Entity#field`, as used in diagnostics.
    pub fn qualified_name(&self, owner: EntityType) -> String {
        format!("{}#{}", owner.short_name(), self.name)
    }
}
