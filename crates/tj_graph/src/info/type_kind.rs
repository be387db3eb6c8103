use core::fmt;

// -----------------------------------------------------------------------------
// TypeKind

/// The structural kind of a registered type.
///
/// - `Struct`: an attribute-bearing, mutable instance. Container subclasses
///   are structs with extra [`Capabilities`](crate::info::Capabilities).
/// - `Record`: a fixed-arity product built from positional values. Immutable,
///   never a reference target.
/// - `Opaque`: no structural representation; only a
///   [`Handler`](crate::handler::Handler) can build or flatten it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Struct,
    Record,
    Opaque,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::Record => f.pad("Record"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}
