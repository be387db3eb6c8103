use core::hash::{Hash, Hasher};
use core::mem;

use super::{ObjId, Record};
use crate::document::Node;
use crate::registry::TypeHandle;

// -----------------------------------------------------------------------------
// Value

/// A value stored inline, without identity of its own.
///
/// Only [`Value::Ref`] refers to an object in a [`Graph`](super::Graph);
/// every other variant is copied when cloned. Tuples and records compare
/// by value, so two equal tuples are indistinguishable after a round trip.
///
/// Floats compare and hash by their bit pattern, which makes `Value`
/// usable as a set member.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An immutable sequence.
    Tuple(Vec<Value>),
    /// An immutable fixed-arity product of a registered record type.
    Record(Record),
    /// A reference to a type itself rather than an instance of it.
    Type(TypeHandle),
    /// Document data kept as-is.
    Raw(Node),
    /// A reference to an object with identity.
    Ref(ObjId),
}

impl Value {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns floats, and integers widened to `f64`.
    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_type(&self) -> Option<&TypeHandle> {
        match self {
            Self::Type(ty) => Some(ty),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_raw(&self) -> Option<&Node> {
        match self {
            Self::Raw(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the object id of a [`Value::Ref`].
    #[inline]
    pub const fn as_obj(&self) -> Option<ObjId> {
        match self {
            Self::Ref(id) => Some(*id),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Equality

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Type(a), Self::Type(b)) => a.path() == b.path(),
            (Self::Raw(a), Self::Raw(b)) => a == b,
            (Self::Ref(a), Self::Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Str(value) => value.hash(state),
            Self::Tuple(items) => items.hash(state),
            Self::Record(record) => record.hash(state),
            Self::Type(ty) => ty.path().hash(state),
            Self::Raw(node) => node.hash(state),
            Self::Ref(id) => id.hash(state),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => |$v:ident| $expr:expr;)*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from($v: $ty) -> Self {
                    $expr
                }
            }
        )*
    };
}

impl_from! {
    bool => |v| Value::Bool(v);
    i32 => |v| Value::Int(i64::from(v));
    u32 => |v| Value::Int(i64::from(v));
    i64 => |v| Value::Int(v);
    f64 => |v| Value::Float(v);
    &str => |v| Value::Str(v.to_owned());
    String => |v| Value::Str(v);
    Record => |v| Value::Record(v);
    TypeHandle => |v| Value::Type(v);
    ObjId => |v| Value::Ref(v);
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use tj_utils::hash::hash_one;

    use super::Value;

    #[test]
    fn float_bits_equality() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_eq!(
            hash_one(&Value::Float(1.5)),
            hash_one(&Value::Float(1.5)),
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from("a"), Value::Str("a".into()));
        assert_eq!(Value::from(Some(3)), Value::Int(3));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
    }
}
