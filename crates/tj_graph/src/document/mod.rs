//! The tagged document tree exchanged with backends.
//!
//! A [`Node`] is the JSON-shaped data model: null, booleans, numbers,
//! strings, sequences and string-keyed mappings. Backends only move nodes
//! to and from bytes; all graph semantics live in the encoder and decoder.

// -----------------------------------------------------------------------------
// Modules

mod node;
mod serde_impls;

// -----------------------------------------------------------------------------
// Exports

pub use node::{Mapping, Node};
