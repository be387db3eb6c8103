use core::hash::{Hash, Hasher};

use super::Value;
use crate::info::TypeKind;
use crate::registry::{AllocError, TypeHandle};

/// An immutable, fixed-arity product built from positional values.
///
/// Records have no identity: two records of the same type holding equal
/// values are equal, and they are never reference targets on the wire.
#[derive(Clone, Debug)]
pub struct Record {
    ty: TypeHandle,
    values: Vec<Value>,
}

impl Record {
    /// Builds a record, checking the kind and the arity of `ty`.
    pub fn new(ty: TypeHandle, values: Vec<Value>) -> Result<Self, AllocError> {
        if ty.kind() != TypeKind::Record {
            return Err(AllocError::NotRecord(ty.path()));
        }
        let expected = ty.fields().len();
        if values.len() != expected {
            return Err(AllocError::ArityMismatch {
                path: ty.path(),
                expected,
                found: values.len(),
            });
        }
        Ok(Self { ty, values })
    }

    #[inline]
    pub(crate) fn from_parts(ty: TypeHandle, values: Vec<Value>) -> Self {
        Self { ty, values }
    }

    #[inline]
    pub fn ty(&self) -> &TypeHandle {
        &self.ty
    }

    /// The positional values, in declaration order of the fields.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Looks a value up by field name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        let index = self.ty.fields().iter().position(|info| info.name() == field)?;
        self.values.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ty.path() == other.ty.path() && self.values == other.values
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.path().hash(state);
        self.values.hash(state);
    }
}
