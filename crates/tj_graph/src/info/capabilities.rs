bitflags::bitflags! {
    /// Optional behaviours of a [`Struct`](crate::info::TypeKind::Struct) type.
    ///
    /// Each flag is probed independently; a type may for example be both
    /// `APPEND` and `INSERT`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Ordered append, a list subclass.
        const APPEND = 1 << 0;
        /// Deduplicating insert, a set subclass.
        const INSERT = 1 << 1;
        /// Attributes are stored by keyed insertion, a mapping subclass.
        const KEYED = 1 << 2;
        /// The instance is captured and restored as one opaque state payload.
        const STATE = 1 << 3;
        /// Allocation accepts a `default_factory` type.
        const FACTORY = 1 << 4;
    }
}
