//! Custom flatten and restore logic keyed by type path.
//!
//! A [`Handler`] takes over both directions for one type: the encoder
//! hands it the object and a mapping that already holds the `type` tag,
//! the decoder hands it that mapping back. Handlers win over every
//! structural rule, and they are the only way to encode an
//! [`Opaque`](crate::graph::Opaque) value.

// -----------------------------------------------------------------------------
// Modules

mod duration;
mod serde_handler;

// -----------------------------------------------------------------------------
// Exports

pub use duration::DurationHandler;
pub use serde_handler::SerdeHandler;

use core::fmt;
use std::sync::Arc;

use tj_utils::hash::HashMap;

use crate::Error;
use crate::document::Mapping;
use crate::graph::{Object, Opaque};
use crate::info::TypePath;

// -----------------------------------------------------------------------------
// Handler

/// Flattens and restores the objects of one type.
///
/// # Example
///
/// ```
/// use tj_graph::Error;
/// use tj_graph::document::{Mapping, Node};
/// use tj_graph::graph::Object;
/// use tj_graph::handler::{Handler, HandlerRegistry, downcast_opaque};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
/// tj_graph::impl_type_path!(Celsius => "units.Celsius");
///
/// struct CelsiusHandler;
///
/// impl Handler for CelsiusHandler {
///     fn flatten(&self, object: &Object, data: &mut Mapping) -> Result<(), Error> {
///         let celsius = downcast_opaque::<Celsius>(object)?;
///         data.insert("degrees".into(), Node::Float(celsius.0));
///         Ok(())
///     }
///
///     fn restore(&self, data: &Mapping) -> Result<Object, Error> {
///         let degrees = data.get("degrees").and_then(Node::as_f64);
///         let degrees = degrees.ok_or_else(|| Error::handler("units.Celsius", "missing `degrees`"))?;
///         Ok(Object::opaque(Celsius(degrees)))
///     }
/// }
///
/// let mut handlers = HandlerRegistry::new();
/// handlers.register_for::<Celsius>(CelsiusHandler);
/// assert!(handlers.lookup("units.Celsius").is_some());
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Adds the payload of `object` to `data`.
    ///
    /// `data` already holds the `type` tag. Reserved tags other than
    /// `type` should not be written.
    fn flatten(&self, object: &Object, data: &mut Mapping) -> Result<(), Error>;

    /// Rebuilds an object from the mapping written by
    /// [`flatten`](Self::flatten).
    fn restore(&self, data: &Mapping) -> Result<Object, Error>;
}

/// Borrows the `T` inside an [`Object::Opaque`], or fails with
/// [`Error::Handler`].
pub fn downcast_opaque<T: Opaque + TypePath>(object: &Object) -> Result<&T, Error> {
    let found = match object {
        Object::Opaque(opaque) => opaque.downcast_ref::<T>(),
        _ => None,
    };
    found.ok_or_else(|| {
        Error::handler(
            T::type_path(),
            format!("expected an opaque `{}`, found {}", T::type_path(), object.kind_name()),
        )
    })
}

// -----------------------------------------------------------------------------
// HandlerRegistry

/// Handlers keyed by type path.
///
/// Registering a path twice replaces the previous handler.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Box<str>, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with handlers for the built-in opaque types.
    ///
    /// - `core.time.Duration`: [`DurationHandler`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_for::<core::time::Duration>(DurationHandler);
        registry
    }

    /// Registers `handler` for `type_path`, returning the handler it replaced.
    pub fn register(
        &mut self,
        type_path: &str,
        handler: impl Handler,
    ) -> Option<Arc<dyn Handler>> {
        self.handlers.insert(type_path.into(), Arc::new(handler))
    }

    /// Registers `handler` for the path of `T`.
    #[inline]
    pub fn register_for<T: TypePath>(&mut self, handler: impl Handler) -> Option<Arc<dyn Handler>> {
        self.register(T::type_path(), handler)
    }

    pub fn unregister(&mut self, type_path: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.remove(type_path)
    }

    /// The handler registered for exactly this path.
    #[inline]
    pub fn lookup(&self, type_path: &str) -> Option<&dyn Handler> {
        self.handlers.get(type_path).map(|handler| handler.as_ref())
    }

    #[inline]
    pub fn contains(&self, type_path: &str) -> bool {
        self.handlers.contains_key(type_path)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{DurationHandler, HandlerRegistry};

    #[test]
    fn register_replaces() {
        let mut handlers = HandlerRegistry::new();
        assert!(handlers.register("pkg.Thing", DurationHandler).is_none());
        assert!(handlers.register("pkg.Thing", DurationHandler).is_some());
        assert_eq!(handlers.len(), 1);
        assert!(handlers.lookup("pkg.Thing").is_some());
        assert!(handlers.lookup("pkg.Other").is_none());
        assert!(handlers.unregister("pkg.Thing").is_some());
        assert!(!handlers.contains("pkg.Thing"));

        assert!(HandlerRegistry::with_builtins().contains("core.time.Duration"));
    }
}
