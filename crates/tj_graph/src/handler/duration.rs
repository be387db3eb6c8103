use core::time::Duration;

use super::{Handler, downcast_opaque};
use crate::Error;
use crate::document::{Mapping, Node};
use crate::graph::Object;
use crate::info::TypePath;
use crate::registry::{GetTypeMeta, TypeMeta};

crate::impl_type_path!(Duration => "core.time.Duration");

impl GetTypeMeta for Duration {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::opaque(Self::type_path())
    }
}

const SECS: &str = "secs";
const NANOS: &str = "nanos";

/// Flattens a [`Duration`] into `secs` and `nanos`.
///
/// ```json
/// {"nanos": 500000000, "secs": 1, "type": "core.time.Duration"}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationHandler;

impl Handler for DurationHandler {
    fn flatten(&self, object: &Object, data: &mut Mapping) -> Result<(), Error> {
        let duration = downcast_opaque::<Duration>(object)?;
        let secs = i64::try_from(duration.as_secs())
            .map_err(|_| Error::handler(Duration::type_path(), "seconds exceed i64"))?;
        data.insert(SECS.into(), Node::Int(secs));
        data.insert(NANOS.into(), Node::Int(i64::from(duration.subsec_nanos())));
        Ok(())
    }

    fn restore(&self, data: &Mapping) -> Result<Object, Error> {
        let field = |name: &str| {
            data.get(name)
                .and_then(Node::as_i64)
                .ok_or_else(|| Error::handler(Duration::type_path(), format!("missing `{name}`")))
        };
        let secs = u64::try_from(field(SECS)?)
            .map_err(|_| Error::handler(Duration::type_path(), "negative seconds"))?;
        let nanos = u32::try_from(field(NANOS)?)
            .map_err(|_| Error::handler(Duration::type_path(), "nanoseconds out of range"))?;
        Ok(Object::opaque(Duration::new(secs, nanos)))
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::DurationHandler;
    use crate::document::{Mapping, Node};
    use crate::graph::Object;
    use crate::handler::Handler;

    #[test]
    fn flatten_restore() {
        let mut data = Mapping::new();
        let object = Object::opaque(Duration::from_millis(1500));
        DurationHandler.flatten(&object, &mut data).unwrap();
        assert_eq!(data.get("secs"), Some(&Node::Int(1)));
        assert_eq!(data.get("nanos"), Some(&Node::Int(500_000_000)));

        let Object::Opaque(restored) = DurationHandler.restore(&data).unwrap() else {
            panic!("expected an opaque object");
        };
        assert_eq!(restored.downcast_ref::<Duration>(), Some(&Duration::from_millis(1500)));
    }

    #[test]
    fn rejects_bad_payloads() {
        assert!(DurationHandler.flatten(&Object::List(Vec::new()), &mut Mapping::new()).is_err());

        let mut data = Mapping::new();
        data.insert("secs".into(), Node::Int(-1));
        data.insert("nanos".into(), Node::Int(0));
        assert!(DurationHandler.restore(&data).is_err());
        assert!(DurationHandler.restore(&Mapping::new()).is_err());
    }
}
