use thiserror::Error;

/// Why a [`TypeMeta`](super::TypeMeta) could not allocate an instance.
///
/// The decoder treats every variant as recoverable and keeps the source
/// mapping as raw data instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AllocError {
    #[error("type `{0}` has no argument-free constructor")]
    MissingArguments(&'static str),
    #[error("type `{path}` takes {expected} positional values, received {found}")]
    ArityMismatch {
        path: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("type `{0}` is opaque and can only be built by a handler")]
    Opaque(&'static str),
    #[error("type `{0}` is not a record")]
    NotRecord(&'static str),
}

/// Why an instance rejected a state payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApplyError {
    #[error("type `{0}` does not accept state")]
    NoState(&'static str),
    #[error("{0}")]
    Rejected(String),
}
