//! Reserved mapping keys of the tagged document format.
//!
//! A mapping carrying one of these keys is interpreted by the decoder
//! instead of being restored as a plain dict. The tag names are part of
//! the wire contract.

/// Names the type of an instance, or a type itself when it is the only key.
pub const TYPE: &str = "type";
/// Back-reference to the n-th object registered during the same call.
pub const ID: &str = "id";
/// Legacy back-reference by slash separated attribute path.
pub const REF: &str = "ref";
/// Legacy `module/expression` payload.
pub const REPR: &str = "repr";
/// Opaque instance state.
pub const STATE: &str = "state";
/// Positional or container contents of an instance.
pub const SEQ: &str = "seq";
/// Elements of a tuple.
pub const TUPLE: &str = "tuple";
/// Members of a set.
pub const SET: &str = "set";

/// Type of the default factory, stored next to the `type` tag.
///
/// Not reserved: it is only interpreted on types accepting a factory.
pub const DEFAULT_FACTORY: &str = "default_factory";

/// Every key a plain dict or instance attribute may not use.
pub const RESERVED: [&str; 8] = [TYPE, ID, REF, REPR, STATE, SEQ, TUPLE, SET];

/// `true` if `key` collides with a reserved tag.
#[inline]
pub fn is_reserved(key: &str) -> bool {
    RESERVED.contains(&key)
}

#[cfg(test)]
mod tests {
    #[test]
    fn reserved() {
        assert!(super::is_reserved("type"));
        assert!(super::is_reserved("seq"));
        assert!(!super::is_reserved("default_factory"));
        assert!(!super::is_reserved("name"));
    }
}
