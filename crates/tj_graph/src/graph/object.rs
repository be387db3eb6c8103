use std::collections::BTreeMap;

use super::{Instance, Opaque, Value, ValueSet};
use crate::document::Node;

/// A mapping from string keys to values.
///
/// Keys are kept sorted, so iteration order is deterministic.
pub type Dict = BTreeMap<String, Value>;

// -----------------------------------------------------------------------------
// Object

/// An object with identity, owned by a [`Graph`](super::Graph).
#[derive(Debug)]
pub enum Object {
    /// A mutable, ordered sequence.
    List(Vec<Value>),
    /// A string-keyed mapping without identity on the wire.
    Dict(Dict),
    /// An unordered collection of hashable values.
    Set(ValueSet),
    /// An instance of a registered struct type.
    Instance(Instance),
    /// A value only a handler can flatten.
    Opaque(Box<dyn Opaque>),
    /// A mapping naming a registered type that could not be allocated.
    ///
    /// Written back verbatim, and numbered as a reference target like an
    /// instance would be.
    Raw(Node),
}

impl Object {
    /// Wraps a value in [`Object::Opaque`].
    #[inline]
    pub fn opaque(value: impl Opaque) -> Self {
        Self::Opaque(Box::new(value))
    }

    /// The type path of instances and opaque values.
    pub fn type_path(&self) -> Option<&str> {
        match self {
            Self::Instance(instance) => Some(instance.ty().path()),
            Self::Opaque(opaque) => Some(opaque.reflect_type_path()),
            _ => None,
        }
    }

    /// A short, human readable name of the variant.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::Set(_) => "set",
            Self::Instance(_) => "instance",
            Self::Opaque(_) => "opaque",
            Self::Raw(_) => "raw",
        }
    }
}

impl From<Vec<Value>> for Object {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Dict> for Object {
    #[inline]
    fn from(value: Dict) -> Self {
        Self::Dict(value)
    }
}

impl From<ValueSet> for Object {
    #[inline]
    fn from(value: ValueSet) -> Self {
        Self::Set(value)
    }
}

impl From<Instance> for Object {
    #[inline]
    fn from(value: Instance) -> Self {
        Self::Instance(value)
    }
}

impl From<Box<dyn Opaque>> for Object {
    #[inline]
    fn from(value: Box<dyn Opaque>) -> Self {
        Self::Opaque(value)
    }
}
