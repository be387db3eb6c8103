#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

pub mod backend;
pub mod document;
pub mod graph;
pub mod handler;
pub mod info;
pub mod registry;
pub mod tags;

mod codec;
mod config;
mod de;
mod error;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use codec::Codec;
pub use config::{Config, ConfigBuilder, DEFAULT_MAX_DEPTH, LegacyRepr};
pub use error::Error;

// -----------------------------------------------------------------------------
// Macro exports

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),+ $(,)?) => {};
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod testing;
