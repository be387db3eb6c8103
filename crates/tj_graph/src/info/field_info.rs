use crate::graph::Value;

// -----------------------------------------------------------------------------
// TypeHint

/// The expected type of an attribute, or of the elements of a container
/// stored in that attribute.
///
/// Hints only pick a better target type for untagged mappings; they are
/// never required to decode a document that carries `type` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHint {
    /// The attribute holds an instance of the type.
    Instance(&'static str),
    /// The attribute holds a list of instances of the type.
    ListOf(&'static str),
    /// The attribute holds a set of instances of the type.
    SetOf(&'static str),
    /// The attribute holds a mapping whose values are instances of the type.
    MapOf(&'static str),
}

impl TypeHint {
    /// The type path named by the hint.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        match self {
            Self::Instance(path) | Self::ListOf(path) | Self::SetOf(path) | Self::MapOf(path) => {
                path
            }
        }
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A declared attribute of a type.
///
/// The default value plays the part of the prototype instance: reading an
/// attribute that was never assigned on an [`Instance`](crate::graph::Instance)
/// yields this value.
///
/// # Examples
///
/// ```
/// use tj_graph::info::{FieldInfo, TypeHint};
///
/// let field = FieldInfo::new("children")
///     .with_hint(TypeHint::ListOf("pkg.Thing"));
///
/// assert_eq!(field.name(), "children");
/// assert!(field.default_value().is_null());
/// ```
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    default: Value,
    hint: Option<TypeHint>,
}

impl FieldInfo {
    /// Creates a field defaulting to `null` without a hint.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            default: Value::Null,
            hint: None,
        }
    }

    /// Replace the prototype default.
    #[inline]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Attach a type hint.
    #[inline]
    pub const fn with_hint(mut self, hint: TypeHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Returns the attribute name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the prototype default.
    #[inline]
    pub const fn default_value(&self) -> &Value {
        &self.default
    }

    /// Returns the declared hint.
    #[inline]
    pub const fn hint(&self) -> Option<TypeHint> {
        self.hint
    }
}
