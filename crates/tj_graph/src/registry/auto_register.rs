use super::{GetTypeMeta, TypeRegistry};

/// One type collected by [`auto_register!`](crate::auto_register).
///
/// Submitted through `inventory` and consumed by
/// [`TypeRegistry::auto_register`].
pub struct AutoRegistration(fn(&mut TypeRegistry));

impl AutoRegistration {
    #[inline]
    pub const fn of<T: GetTypeMeta>() -> Self {
        Self(register_one::<T>)
    }
}

fn register_one<T: GetTypeMeta>(registry: &mut TypeRegistry) {
    registry.register::<T>();
}

fn available(_: &mut TypeRegistry) {}

inventory::collect!(AutoRegistration);

// Always present, so an empty iteration means the platform lacks support.
inventory::submit! { AutoRegistration(available) }

/// Runs every collected registration, returns `false` if none was found.
pub(crate) fn register_all(registry: &mut TypeRegistry) -> bool {
    let mut found = false;
    for entry in inventory::iter::<AutoRegistration> {
        (entry.0)(registry);
        found = true;
    }
    found
}

/// Declares types to be registered by [`TypeRegistry::auto_register`].
///
/// Each type must implement [`GetTypeMeta`]. Without the `auto_register`
/// feature the macro expands to nothing.
///
/// ```
/// use tj_graph::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
///
/// struct Thing;
/// tj_graph::impl_type_path!(Thing => "pkg.Thing");
/// impl GetTypeMeta for Thing {
///     fn get_type_meta() -> TypeMeta {
///         TypeMeta::structure("pkg.Thing")
///     }
/// }
///
/// tj_graph::auto_register!(Thing);
///
/// let mut registry = TypeRegistry::empty();
/// if registry.auto_register() {
///     assert!(registry.contains("pkg.Thing"));
/// }
/// ```
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::__macro_exports::inventory::submit! {
                $crate::registry::AutoRegistration::of::<$ty>()
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    struct Collected;
    crate::impl_type_path!(Collected => "tests.auto.Collected");

    impl GetTypeMeta for Collected {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::structure("tests.auto.Collected")
        }
    }

    crate::auto_register!(Collected);

    #[test]
    fn collects_declared_types() {
        let mut registry = TypeRegistry::empty();
        if registry.auto_register() {
            assert!(registry.contains("tests.auto.Collected"));
            // repeated calls add nothing
            let len = registry.len();
            assert!(registry.auto_register());
            assert_eq!(registry.len(), len);
        }
    }
}
