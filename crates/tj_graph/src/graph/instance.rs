use super::{Dict, Value, ValueSet};
use crate::info::Capabilities;
use crate::registry::TypeHandle;

// -----------------------------------------------------------------------------
// Instance

/// A mutable instance of a registered struct type.
///
/// Besides named attributes an instance carries the storage its
/// [`Capabilities`] call for: ordered items for `APPEND`, members for
/// `INSERT`, keyed entries for `KEYED` and an opaque state for `STATE`.
/// Storage for a capability the type lacks stays empty.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tj_graph::graph::{Instance, Value};
/// use tj_graph::info::FieldInfo;
/// use tj_graph::registry::TypeMeta;
///
/// let ty = Arc::new(
///     TypeMeta::structure("pkg.Thing")
///         .with_field(FieldInfo::new("name").with_default("nameless")),
/// );
///
/// let mut thing = Instance::new(ty);
/// assert_eq!(thing.attr("name"), Some(&Value::from("nameless")));
///
/// thing.set_attr("name", Value::from("data"));
/// assert_eq!(thing.attr("name"), Some(&Value::from("data")));
/// ```
#[derive(Clone, Debug)]
pub struct Instance {
    ty: TypeHandle,
    attrs: Dict,
    items: Vec<Value>,
    members: ValueSet,
    entries: Dict,
    state: Option<Value>,
    factory: Option<TypeHandle>,
}

impl Instance {
    /// Creates an instance with no assigned attributes.
    pub fn new(ty: TypeHandle) -> Self {
        Self {
            ty,
            attrs: Dict::new(),
            items: Vec::new(),
            members: ValueSet::new(),
            entries: Dict::new(),
            state: None,
            factory: None,
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    #[inline]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[inline]
    pub fn ty(&self) -> &TypeHandle {
        &self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.ty.capabilities()
    }

    /// Reads an attribute, falling back to the declared default.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs
            .get(name)
            .or_else(|| self.ty.field(name).map(|field| field.default_value()))
    }

    /// Reads an attribute only if it was assigned on this instance.
    #[inline]
    pub fn own_attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Attributes assigned on this instance, sorted by name.
    #[inline]
    pub fn attrs(&self) -> &Dict {
        &self.attrs
    }

    /// Assigns an attribute, returning the previous own value.
    #[inline]
    pub fn set_attr(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.attrs.insert(name.into(), value)
    }

    /// Stores `value` under `key` the way the type expects: keyed insertion
    /// for `KEYED` types, attribute assignment otherwise.
    pub fn assign(&mut self, key: impl Into<String>, value: Value) {
        if self.capabilities().contains(Capabilities::KEYED) {
            self.entries.insert(key.into(), value);
        } else {
            self.attrs.insert(key.into(), value);
        }
    }

    /// Appends an item. Returns `false` if the type is not `APPEND`.
    pub fn push_item(&mut self, value: Value) -> bool {
        let supported = self.capabilities().contains(Capabilities::APPEND);
        if supported {
            self.items.push(value);
        }
        supported
    }

    /// Inserts a member. Returns `false` if the type is not `INSERT`.
    pub fn add_member(&mut self, value: Value) -> bool {
        let supported = self.capabilities().contains(Capabilities::INSERT);
        if supported {
            self.members.insert(value);
        }
        supported
    }

    /// Inserts a keyed entry. Returns `false` if the type is not `KEYED`.
    pub fn insert_entry(&mut self, key: impl Into<String>, value: Value) -> bool {
        let supported = self.capabilities().contains(Capabilities::KEYED);
        if supported {
            self.entries.insert(key.into(), value);
        }
        supported
    }

    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn members(&self) -> &ValueSet {
        &self.members
    }

    #[inline]
    pub fn entries(&self) -> &Dict {
        &self.entries
    }

    /// The factory the instance was allocated with.
    #[inline]
    pub fn factory(&self) -> Option<&TypeHandle> {
        self.factory.as_ref()
    }

    #[inline]
    pub(crate) fn set_factory(&mut self, factory: TypeHandle) {
        self.factory = Some(factory);
    }

    /// The state slot used when the type has no custom state hooks.
    #[inline]
    pub fn stored_state(&self) -> Option<&Value> {
        self.state.as_ref()
    }

    /// Fills the default state slot.
    #[inline]
    pub fn store_state(&mut self, state: Value) {
        self.state = Some(state);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Instance;
    use crate::graph::Value;
    use crate::info::{Capabilities, FieldInfo};
    use crate::registry::TypeMeta;

    #[test]
    fn capability_gated_storage() {
        let plain = Arc::new(TypeMeta::structure("pkg.Plain"));
        let mut a = Instance::new(plain);
        assert!(!a.push_item(Value::Int(1)));
        assert!(!a.add_member(Value::Int(1)));
        a.assign("k", Value::Int(1));
        assert_eq!(a.own_attr("k"), Some(&Value::Int(1)));
        assert!(a.entries().is_empty());

        let keyed = Arc::new(
            TypeMeta::structure("pkg.Keyed").with_capabilities(Capabilities::KEYED),
        );
        let mut b = Instance::new(keyed);
        b.assign("k", Value::Int(1));
        assert_eq!(b.entries().get("k"), Some(&Value::Int(1)));
        assert!(b.own_attr("k").is_none());
    }

    #[test]
    fn prototype_defaults() {
        let ty = Arc::new(
            TypeMeta::structure("pkg.Thing")
                .with_field(FieldInfo::new("name").with_default("nameless"))
                .with_field(FieldInfo::new("child")),
        );
        let thing = Instance::new(ty);
        assert_eq!(thing.attr("name"), Some(&Value::from("nameless")));
        assert_eq!(thing.attr("child"), Some(&Value::Null));
        assert_eq!(thing.attr("missing"), None);
        assert!(thing.attrs().is_empty());
    }
}
