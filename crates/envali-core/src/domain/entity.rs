//! The validatable capability and entity-type identity.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::field::Field;

/// Identity of a validatable type.
///
/// Two identities are equal when they name the same Rust type. The
/// human-readable name is carried along for diagnostics only.
#[derive(Debug, Clone, Copy)]
pub struct EntityType {
    id: TypeId,
    name: &'static str,
}

impl EntityType {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, e.g. `my_app::model::User`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, without generic arguments.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A value whose fields can be walked by the validator.
///
/// Implementations list their fields in declaration order, each with the
/// directives attached to it. The list is rebuilt on every validation pass,
/// so it may borrow from `self` freely.
///
/// ```rust
/// use envali_core::domain::{Directive, Field, Validatable};
///
/// struct Signup {
///     email: String,
///     age: i32,
/// }
///
/// impl Validatable for Signup {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("email", &self.email).with(Directive::non_blank()),
///             Field::new("age", self.age).with(Directive::range(18, 130)),
///         ]
///     }
/// }
/// ```
pub trait Validatable: 'static {
    /// Identity under which this entity's errors are recorded.
    fn entity_type(&self) -> EntityType {
        EntityType::of::<Self>()
    }

    /// Name of the content resource that supplies directive parameters,
    /// if any. `Some("user")` resolves to `content/envali/user.json`.
    fn content_mapping(&self) -> Option<&str> {
        None
    }

    /// Declared fields with their directives.
    fn fields(&self) -> Vec<Field<'_>>;
}
