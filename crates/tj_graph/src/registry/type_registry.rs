use core::time::Duration;
use std::sync::Arc;

use tj_utils::hash::{HashMap, HashSet};

use crate::info::{TypePath, split_type_path};
use crate::registry::{TypeHandle, TypeMeta};

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`]
/// for registration into the [`TypeRegistry`].
///
/// # Example
///
/// ```
/// use tj_graph::info::FieldInfo;
/// use tj_graph::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
///
/// struct Thing;
/// tj_graph::impl_type_path!(Thing => "pkg.Thing");
///
/// impl GetTypeMeta for Thing {
///     fn get_type_meta() -> TypeMeta {
///         TypeMeta::structure("pkg.Thing")
///             .with_field(FieldInfo::new("name"))
///             .with_field(FieldInfo::new("child"))
///     }
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Thing>();
/// assert!(registry.resolve("pkg.Thing").is_some());
/// ```
pub trait GetTypeMeta: TypePath {
    /// Returns the metadata of this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    ///
    /// Called once, right after this type was registered for the first time.
    #[inline(always)]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// The resolver between dotted type names and [`TypeMeta`].
///
/// A name is resolved by splitting it at its last dot into a namespace
/// and a local name, then looking the local name up in that namespace.
/// Names without a namespace never resolve. Every registered type
/// resolves back from [`name_of`](Self::name_of).
///
/// Registering a path twice through [`insert`](Self::insert) replaces the
/// metadata. [`register`](Self::register) keeps the first registration.
///
/// # Example
///
/// ```
/// use tj_graph::registry::{TypeMeta, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// let handle = registry.insert(TypeMeta::structure("pkg.sub.Thing"));
///
/// let found = registry.resolve("pkg.sub.Thing").unwrap();
/// assert_eq!(registry.name_of(&found), Some("pkg.sub.Thing"));
/// assert!(std::sync::Arc::ptr_eq(&handle, &found));
///
/// assert!(registry.resolve("Thing").is_none());
/// assert!(registry.resolve("pkg.Thing").is_none());
/// assert!(registry.get_with_type_name("Thing").is_some());
/// ```
#[derive(Debug)]
pub struct TypeRegistry {
    types: HashMap<&'static str, TypeHandle>,
    namespaces: HashMap<&'static str, HashMap<&'static str, TypeHandle>>,
    type_name_to_path: HashMap<&'static str, &'static str>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create an empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            types: HashMap::default(),
            namespaces: HashMap::default(),
            type_name_to_path: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Create a type registry with the built-in opaque types.
    ///
    /// - `core.time.Duration`, flattened by
    ///   [`DurationHandler`](crate::handler::DurationHandler).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<Duration>();
        registry
    }

    // # Validity
    // The path must **not** already exist.
    fn add_new_type_indices(&mut self, handle: &TypeHandle) {
        let path = handle.path();
        let type_name = handle.name();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_path.contains_key(type_name) {
                self.type_name_to_path.remove(type_name);
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_path.insert(type_name, path);
            }
        }

        if let Some((module, name)) = split_type_path(path) {
            self.namespaces
                .entry(module)
                .or_default()
                .insert(name, Arc::clone(handle));
        }
    }

    /// Insert or **Overwrite** the metadata registered under its path.
    ///
    /// Returns the handle now stored in the registry.
    pub fn insert(&mut self, meta: TypeMeta) -> TypeHandle {
        let handle = Arc::new(meta);
        let path = handle.path();
        if self.types.contains_key(path) {
            if let Some((module, name)) = split_type_path(path) {
                self.namespaces
                    .entry(module)
                    .or_default()
                    .insert(name, Arc::clone(&handle));
            }
        } else {
            self.add_new_type_indices(&handle);
        }
        self.types.insert(path, Arc::clone(&handle));
        handle
    }

    /// Try add or do nothing.
    ///
    /// Returns `false` if the path was already registered.
    pub fn try_insert(&mut self, meta: TypeMeta) -> bool {
        if self.types.contains_key(meta.path()) {
            return false;
        }
        self.insert(meta);
        true
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// This will also register its dependencies as specified by
    /// [`GetTypeMeta::register_dependencies`].
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.try_insert(T::get_type_meta()) {
            T::register_dependencies(self);
        }
    }

    /// Registers every type declared through [`auto_register!`](crate::auto_register).
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration is supported on the current
    /// platform. Always `false` without the `auto_register` feature.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            super::auto_register::register_all(self)
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Whether a type with this exact path has been registered.
    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.types.contains_key(path)
    }

    /// Returns the metadata registered under this exact path.
    #[inline]
    pub fn get(&self, path: &str) -> Option<&TypeHandle> {
        self.types.get(path)
    }

    /// Resolves a dotted type name.
    ///
    /// Returns `None` when the name has no namespace, the namespace is
    /// unknown, or the namespace has no such member.
    pub fn resolve(&self, name: &str) -> Option<TypeHandle> {
        let Some((module, local)) = split_type_path(name) else {
            log::debug!("type name `{name}` has no namespace");
            return None;
        };
        let Some(namespace) = self.namespaces.get(module) else {
            log::debug!("namespace `{module}` of `{name}` is not registered");
            return None;
        };
        let found = namespace.get(local).cloned();
        if found.is_none() {
            log::debug!("namespace `{module}` has no type `{local}`");
        }
        found
    }

    /// The canonical name of `meta`, if it is the metadata registered
    /// under its path.
    pub fn name_of(&self, meta: &TypeMeta) -> Option<&'static str> {
        self.types
            .get(meta.path())
            .filter(|handle| core::ptr::eq(Arc::as_ptr(handle), meta))
            .map(|handle| handle.path())
    }

    /// Returns the metadata of the type with the given short name.
    ///
    /// If the name is ambiguous, or if no type has this name, returns `None`.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeHandle> {
        let path = self.type_name_to_path.get(type_name)?;
        self.types.get(path)
    }

    /// Returns `true` if the given short name belongs to more than one type.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns an iterator over all registered metadata.
    pub fn iter(&self) -> impl Iterator<Item = &TypeHandle> {
        self.types.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::TypeRegistry;
    use crate::info::TypeKind;
    use crate::registry::TypeMeta;

    #[test]
    fn builtins() {
        let registry = TypeRegistry::new();
        let duration = registry.resolve("core.time.Duration").unwrap();
        assert_eq!(duration.kind(), TypeKind::Opaque);
        assert_eq!(TypeRegistry::empty().len(), 0);
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = TypeRegistry::empty();
        registry.insert(TypeMeta::structure("a.Thing"));
        assert!(registry.get_with_type_name("Thing").is_some());

        registry.insert(TypeMeta::structure("b.Thing"));
        assert!(registry.get_with_type_name("Thing").is_none());
        assert!(registry.is_ambiguous("Thing"));

        // full paths stay distinct
        assert_eq!(registry.resolve("a.Thing").unwrap().path(), "a.Thing");
        assert_eq!(registry.resolve("b.Thing").unwrap().path(), "b.Thing");
    }

    #[test]
    fn insert_overwrites() {
        let mut registry = TypeRegistry::empty();
        let first = registry.insert(TypeMeta::structure("pkg.Thing"));
        assert!(!registry.try_insert(TypeMeta::opaque("pkg.Thing")));
        assert!(Arc::ptr_eq(&first, &registry.resolve("pkg.Thing").unwrap()));

        let second = registry.insert(TypeMeta::opaque("pkg.Thing"));
        let found = registry.resolve("pkg.Thing").unwrap();
        assert!(Arc::ptr_eq(&second, &found));
        assert_eq!(found.kind(), TypeKind::Opaque);
        assert_eq!(registry.name_of(&first), None);
        assert_eq!(registry.name_of(&second), Some("pkg.Thing"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unresolvable_names() {
        let mut registry = TypeRegistry::empty();
        registry.insert(TypeMeta::structure("pkg.Thing"));
        assert!(registry.resolve("Thing").is_none());
        assert!(registry.resolve("other.Thing").is_none());
        assert!(registry.resolve("pkg.Other").is_none());
        assert!(registry.resolve("").is_none());
    }
}
