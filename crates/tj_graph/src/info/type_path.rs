// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// Paths are dot separated, `pkg.sub.Thing`. Everything before the last
/// dot is the namespace, the last segment is the type name. The path is
/// what a tagged document stores under the `type` tag, so it must stay
/// stable across refactors of the Rust module tree.
///
/// # Implementation
///
/// Use [`impl_type_path!`](crate::impl_type_path) for both local and
/// foreign types:
///
/// ```
/// use tj_graph::info::TypePath;
///
/// struct Thing;
/// tj_graph::impl_type_path!(Thing => "pkg.Thing");
///
/// assert_eq!(Thing::type_path(), "pkg.Thing");
/// assert_eq!(Thing::type_name(), "Thing");
/// assert_eq!(Thing::module_path(), Some("pkg"));
/// ```
pub trait TypePath: 'static {
    /// The full, unique path of the type.
    fn type_path() -> &'static str;

    /// The last path segment.
    fn type_name() -> &'static str {
        let path = Self::type_path();
        split_type_path(path).map_or(path, |(_, name)| name)
    }

    /// The namespace part of the path, if any.
    fn module_path() -> Option<&'static str> {
        split_type_path(Self::type_path()).map(|(module, _)| module)
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Dynamic dispatch for [`TypePath`].
///
/// Automatically implemented for every [`TypePath`] type.
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &str;

    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &str;

    /// See [`TypePath::module_path`].
    fn reflect_module_path(&self) -> Option<&str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &str {
        Self::type_name()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// Utils

/// Splits `pkg.sub.Thing` into `("pkg.sub", "Thing")`.
///
/// Returns `None` when there is no namespace or no local name.
///
/// ```
/// use tj_graph::info::split_type_path;
///
/// assert_eq!(split_type_path("pkg.sub.Thing"), Some(("pkg.sub", "Thing")));
/// assert_eq!(split_type_path("Thing"), None);
/// ```
pub fn split_type_path(path: &str) -> Option<(&str, &str)> {
    match path.rsplit_once('.') {
        Some((module, name)) if !module.is_empty() && !name.is_empty() => Some((module, name)),
        _ => None,
    }
}

/// Implement [`TypePath`] with a fixed dotted path.
///
/// ```
/// struct Celsius(f64);
/// tj_graph::impl_type_path!(Celsius => "units.Celsius");
/// ```
#[macro_export]
macro_rules! impl_type_path {
    ($ty:ty => $path:literal) => {
        impl $crate::info::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                $path
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DynamicTypePath, TypePath, split_type_path};

    struct Nested;
    crate::impl_type_path!(Nested => "pkg.deep.inner.Nested");

    #[test]
    fn type_path() {
        assert!(Nested::type_path() == "pkg.deep.inner.Nested");
        assert!(Nested::module_path() == Some("pkg.deep.inner"));
        assert!(Nested::type_name() == "Nested");
        assert!(Nested.reflect_type_name() == "Nested");
    }

    #[test]
    fn split_edge_cases() {
        assert_eq!(split_type_path("a.b"), Some(("a", "b")));
        assert_eq!(split_type_path(".b"), None);
        assert_eq!(split_type_path("a."), None);
        assert_eq!(split_type_path(""), None);
    }
}
