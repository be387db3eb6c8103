use thiserror::Error;

use crate::graph::ObjId;
use crate::registry::ApplyError;

/// An error that aborts an encode or decode call.
///
/// Recoverable degradations (an unknown type name, a type that cannot be
/// allocated, a dangling legacy path) are logged and never surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An `id` tag points past the objects restored so far.
    #[error("reference {index} points past the {len} objects restored so far")]
    DanglingReference { index: usize, len: usize },
    /// An `id` tag does not hold a non-negative integer.
    #[error("reference tag holds `{0}`, expected a non-negative integer")]
    MalformedReference(String),
    /// A `repr` payload the decoder refuses to evaluate.
    #[error("unsupported legacy payload `{0}`")]
    UnsupportedLegacy(String),
    #[error("nesting exceeds the depth limit of {0}")]
    DepthLimit(usize),
    #[error("object {0} does not exist in the graph")]
    UnknownObject(ObjId),
    /// A dict or attribute key that would be read back as a tag.
    #[error("key `{0}` collides with a reserved tag")]
    ReservedKey(String),
    /// An attribute on an instance of a keyed type, which would read back
    /// as an entry.
    #[error("attribute `{0}` is set on an instance of a keyed type")]
    KeyedAttribute(String),
    /// NaN or an infinity, which JSON cannot carry.
    #[error("float `{0}` has no document form")]
    NonFiniteFloat(f64),
    /// A cycle passing only through dicts and sets, which carry no id.
    #[error("object {0} closes a cycle through containers without identity")]
    UnrepresentableCycle(ObjId),
    #[error("no handler is registered for opaque type `{0}`")]
    MissingHandler(String),
    #[error("handler for `{path}` failed: {message}")]
    Handler { path: String, message: String },
    #[error("type `{path}` rejected its state")]
    State {
        path: String,
        #[source]
        source: ApplyError,
    },
    #[error("unknown backend `{0}`")]
    UnknownBackend(String),
    #[error("backend `{0}` is not enabled in this build")]
    BackendUnavailable(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "ron")]
    #[error(transparent)]
    Ron(#[from] ron::Error),
    #[cfg(feature = "ron")]
    #[error(transparent)]
    RonParse(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Utf8(#[from] core::str::Utf8Error),
}

impl Error {
    /// Shorthand for [`Error::Handler`].
    pub fn handler(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            path: path.into(),
            message: message.into(),
        }
    }
}
