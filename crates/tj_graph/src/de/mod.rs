//! Rebuilding an object graph from a tagged document.

// -----------------------------------------------------------------------------
// Modules

mod legacy;
mod references;
mod restorer;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use restorer::{Expected, Restorer};

// -----------------------------------------------------------------------------
// Tests
