use core::any::Any;
use core::fmt::Debug;

use crate::info::{DynamicTypePath, TypePath};

/// A value with no structural representation.
///
/// Opaque values are flattened and rebuilt only by a
/// [`Handler`](crate::handler::Handler) registered for their type path.
/// The trait is implemented for every `TypePath + Debug + PartialEq` type
/// that can cross threads.
pub trait Opaque: DynamicTypePath + Any + Debug + Send + Sync {
    /// Value equality with another opaque object of any type.
    fn opaque_eq(&self, other: &dyn Opaque) -> bool;
}

impl<T: TypePath + Debug + PartialEq + Send + Sync> Opaque for T {
    fn opaque_eq(&self, other: &dyn Opaque) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

impl dyn Opaque {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Opaque>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Opaque>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Opaque>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::Opaque;

    #[derive(Debug, PartialEq)]
    struct Celsius(i32);
    crate::impl_type_path!(Celsius => "units.Celsius");

    #[test]
    fn downcast_and_compare() {
        let a: Box<dyn Opaque> = Box::new(Celsius(20));
        let b: Box<dyn Opaque> = Box::new(Celsius(20));
        let c: Box<dyn Opaque> = Box::new(Duration::from_secs(20));

        assert!(a.is::<Celsius>());
        assert_eq!(a.downcast_ref::<Celsius>(), Some(&Celsius(20)));
        assert!(a.opaque_eq(b.as_ref()));
        assert!(!a.opaque_eq(c.as_ref()));
        assert_eq!(c.reflect_type_path(), "core.time.Duration");
    }
}
