//! Byte encodings of a [`Node`] document.
//!
//! Backends are picked by name, see [`load_backend`]. They never see the
//! object graph, only the tagged document tree.

// -----------------------------------------------------------------------------
// Modules

mod json;
#[cfg(feature = "ron")]
mod ron_format;

// -----------------------------------------------------------------------------
// Exports

pub use json::JsonBackend;
#[cfg(feature = "ron")]
pub use ron_format::RonBackend;

use crate::Error;
use crate::document::Node;

/// Name of the backend used when nothing else is configured.
pub const DEFAULT_BACKEND: &str = "json";

/// Every backend name [`load_backend`] knows.
pub const BACKEND_NAMES: [&str; 3] = ["json", "json-pretty", "ron"];

// -----------------------------------------------------------------------------
// Backend

/// Serializes documents to bytes and parses them back.
///
/// Implementations must keep mapping keys as strings and keep integers
/// apart from floats.
pub trait Backend: Send + Sync {
    /// The name the backend is loaded by.
    fn name(&self) -> &'static str;

    fn serialize(&self, document: &Node) -> Result<Vec<u8>, Error>;

    fn parse(&self, bytes: &[u8]) -> Result<Node, Error>;
}

/// Loads a backend by name.
///
/// - `json`: compact JSON, the default.
/// - `json-pretty`: indented JSON.
/// - `ron`: RON, requires the `ron` feature.
///
/// ```
/// use tj_graph::backend::load_backend;
///
/// assert_eq!(load_backend("json").unwrap().name(), "json");
/// assert!(load_backend("yaml").is_err());
/// ```
pub fn load_backend(name: &str) -> Result<Box<dyn Backend>, Error> {
    match name {
        "json" => Ok(Box::new(JsonBackend::compact())),
        "json-pretty" => Ok(Box::new(JsonBackend::pretty())),
        "ron" => load_ron(),
        other => Err(Error::UnknownBackend(other.to_owned())),
    }
}

#[cfg(feature = "ron")]
fn load_ron() -> Result<Box<dyn Backend>, Error> {
    Ok(Box::new(RonBackend))
}

#[cfg(not(feature = "ron"))]
fn load_ron() -> Result<Box<dyn Backend>, Error> {
    Err(Error::BackendUnavailable("ron"))
}

#[cfg(test)]
mod tests {
    use super::{BACKEND_NAMES, load_backend};
    use crate::Error;

    #[test]
    fn names() {
        for name in BACKEND_NAMES {
            match load_backend(name) {
                Ok(backend) => assert_eq!(backend.name(), name),
                Err(Error::BackendUnavailable(missing)) => assert_eq!(missing, name),
                Err(err) => panic!("{name}: {err}"),
            }
        }
        assert!(matches!(load_backend("xml"), Err(Error::UnknownBackend(name)) if name == "xml"));
    }
}
