//! Static descriptions of types: paths, kinds, fields and capabilities.
//!
//! ## Menu
//!
//! - [`TypePath`]: a static accessor to the dotted path a type is known by.
//! - [`DynamicTypePath`]: the object-safe counterpart of [`TypePath`].
//! - [`split_type_path`]: splits a path into namespace and local name.
//! - [`TypeKind`]: the closed set of structural kinds.
//! - [`Capabilities`]: insertion styles and hooks a struct kind supports.
//! - [`FieldInfo`]: a declared attribute with its prototype default.
//! - [`TypeHint`]: the expected type of an attribute or of its elements.

// -----------------------------------------------------------------------------
// Modules

mod capabilities;
mod field_info;
mod type_kind;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use capabilities::Capabilities;
pub use field_info::{FieldInfo, TypeHint};
pub use type_kind::TypeKind;
pub use type_path::{DynamicTypePath, TypePath, split_type_path};
