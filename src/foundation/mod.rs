//! Shared primitives: error taxonomy and core pixel/geometry types.

/// Canvas and premultiplied pixel types.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
