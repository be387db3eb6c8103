//! Type metadata and name resolution.
//!
//! A [`TypeMeta`] describes how to allocate and populate instances of one
//! type. The [`TypeRegistry`] maps dotted type paths to shared
//! [`TypeHandle`]s, in both directions.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod type_meta;
mod type_registry;

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use error::{AllocError, ApplyError};
pub use type_meta::{Allocation, GetState, LegacyConstructor, SetState, TypeHandle, TypeMeta};
pub use type_registry::{GetTypeMeta, TypeRegistry};

#[cfg(feature = "auto_register")]
pub use auto_register::AutoRegistration;
