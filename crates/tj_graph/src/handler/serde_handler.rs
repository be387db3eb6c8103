use core::fmt::Debug;
use core::marker::PhantomData;

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;

use super::{Handler, downcast_opaque};
use crate::Error;
use crate::document::{Mapping, Node};
use crate::graph::Object;
use crate::info::TypePath;

/// The key holding the serialized payload.
pub const VALUE_KEY: &str = "value";

/// A [`Handler`] for any serde-enabled opaque type.
///
/// The value is serialized into a document node and stored under `value`:
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use tj_graph::handler::{HandlerRegistry, SerdeHandler};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Rgb(u8, u8, u8);
/// tj_graph::impl_type_path!(Rgb => "color.Rgb");
///
/// let mut handlers = HandlerRegistry::new();
/// handlers.register_for::<Rgb>(SerdeHandler::<Rgb>::new());
/// ```
pub struct SerdeHandler<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeHandler<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeHandler<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Handler for SerdeHandler<T>
where
    T: TypePath + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned,
{
    fn flatten(&self, object: &Object, data: &mut Mapping) -> Result<(), Error> {
        let value = downcast_opaque::<T>(object)?;
        let payload: Node = serde_json::from_value(serde_json::to_value(value)?)?;
        data.insert(VALUE_KEY.into(), payload);
        Ok(())
    }

    fn restore(&self, data: &Mapping) -> Result<Object, Error> {
        let payload = data
            .get(VALUE_KEY)
            .ok_or_else(|| Error::handler(T::type_path(), format!("missing `{VALUE_KEY}`")))?;
        let value: T = serde_json::from_value(serde_json::to_value(payload)?)?;
        Ok(Object::opaque(value))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::SerdeHandler;
    use crate::document::{Mapping, Node};
    use crate::graph::Object;
    use crate::handler::Handler;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Version {
        major: u32,
        minor: u32,
    }
    crate::impl_type_path!(Version => "semver.Version");

    #[test]
    fn payload_under_value() {
        let handler = SerdeHandler::<Version>::new();
        let mut data = Mapping::new();
        let object = Object::opaque(Version { major: 1, minor: 4 });
        handler.flatten(&object, &mut data).unwrap();

        let payload = data.get("value").unwrap();
        assert_eq!(payload.get("major"), Some(&Node::Int(1)));
        assert_eq!(payload.get("minor"), Some(&Node::Int(4)));

        let Object::Opaque(restored) = handler.restore(&data).unwrap() else {
            panic!("expected an opaque object");
        };
        assert_eq!(
            restored.downcast_ref::<Version>(),
            Some(&Version { major: 1, minor: 4 }),
        );
        assert!(handler.restore(&Mapping::new()).is_err());
    }
}
