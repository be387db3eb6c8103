//! The in-memory object graph.
//!
//! Objects with identity live in a [`Graph`] arena and are addressed by
//! [`ObjId`]. Everything without identity (scalars, tuples, records, type
//! references and raw data) is held inline in a [`Value`].
//!
//! Any number of values may hold a [`Value::Ref`] to the same object, and
//! objects may reference each other in cycles. Equality of two values that
//! contain references is structural, see [`Graph::structurally_eq`].

// -----------------------------------------------------------------------------
// Modules

mod arena;
mod compare;
mod instance;
mod object;
mod opaque;
mod record;
mod set;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use arena::{Graph, ObjId};
pub use instance::Instance;
pub use object::{Dict, Object};
pub use opaque::Opaque;
pub use record::Record;
pub use set::ValueSet;
pub use value::Value;
