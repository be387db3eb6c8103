use core::fmt;

use super::{Dict, Instance, Object, Opaque, Value, ValueSet};

// -----------------------------------------------------------------------------
// ObjId

/// The identity of an object inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(usize);

impl ObjId {
    /// Returns the arena slot of the object.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// Graph

/// An arena owning every object with identity.
///
/// Objects are never removed, so an [`ObjId`] handed out by a graph stays
/// valid for the graph's lifetime.
///
/// # Examples
///
/// ```
/// use tj_graph::graph::{Graph, Object, Value};
///
/// let mut graph = Graph::new();
/// let list = graph.insert(Object::List(Vec::new()));
/// // a list containing itself
/// graph.list_mut(list).unwrap().push(Value::Ref(list));
///
/// assert_eq!(graph.list(&Value::Ref(list)).unwrap()[0], Value::Ref(list));
/// ```
#[derive(Debug, Default)]
pub struct Graph {
    objects: Vec<Object>,
}

impl Graph {
    /// Creates an empty graph.
    #[inline]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Moves `object` into the arena and returns its identity.
    pub fn insert(&mut self, object: impl Into<Object>) -> ObjId {
        let id = ObjId(self.objects.len());
        self.objects.push(object.into());
        id
    }

    /// Like [`insert`](Self::insert), but returns a [`Value::Ref`].
    #[inline]
    pub fn alloc(&mut self, object: impl Into<Object>) -> Value {
        Value::Ref(self.insert(object))
    }

    #[inline]
    pub fn get(&self, id: ObjId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    /// Returns the object a [`Value::Ref`] points to.
    pub fn resolve(&self, value: &Value) -> Option<&Object> {
        match value {
            Value::Ref(id) => self.get(*id),
            _ => None,
        }
    }

    /// Number of objects in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates all objects in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjId(index), object))
    }

    pub fn list(&self, value: &Value) -> Option<&[Value]> {
        match self.resolve(value)? {
            Object::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn list_mut(&mut self, id: ObjId) -> Option<&mut Vec<Value>> {
        match self.get_mut(id)? {
            Object::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn dict(&self, value: &Value) -> Option<&Dict> {
        match self.resolve(value)? {
            Object::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn dict_mut(&mut self, id: ObjId) -> Option<&mut Dict> {
        match self.get_mut(id)? {
            Object::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn set(&self, value: &Value) -> Option<&ValueSet> {
        match self.resolve(value)? {
            Object::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn instance(&self, value: &Value) -> Option<&Instance> {
        match self.resolve(value)? {
            Object::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn instance_mut(&mut self, id: ObjId) -> Option<&mut Instance> {
        match self.get_mut(id)? {
            Object::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Returns the opaque object behind `value`, downcast to `T`.
    pub fn opaque<T: Opaque>(&self, value: &Value) -> Option<&T> {
        match self.resolve(value)? {
            Object::Opaque(opaque) => opaque.downcast_ref::<T>(),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Graph;
    use crate::graph::{Object, Value};

    #[test]
    fn ids_are_stable() {
        let mut graph = Graph::new();
        let a = graph.insert(Object::List(Vec::new()));
        let b = graph.insert(Object::List(Vec::new()));
        assert_ne!(a, b);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(graph.len(), 2);

        graph.list_mut(b).unwrap().push(Value::Ref(a));
        assert_eq!(graph.list(&Value::Ref(b)).unwrap(), &[Value::Ref(a)]);
        assert!(graph.dict(&Value::Ref(a)).is_none());
        assert!(graph.list(&Value::Int(1)).is_none());
    }
}
