//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! Every container defaults to [`FixedHashState`]. A random seed would make
//! the iteration order of a set differ between two processes, and the
//! encoder emits set members in iteration order.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher, hash_one};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
///
/// `HashMap::new` is only provided for hashbrown's own default hasher,
/// use `HashMap::default()` instead.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
///
/// `HashSet::new` is only provided for hashbrown's own default hasher,
/// use `HashSet::default()` instead.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
