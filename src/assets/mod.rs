//! Input resolution and decoding for background and icon images.

/// Raster and SVG decoding into premultiplied RGBA8.
pub mod decode;
/// Parallel decoding of one generation's inputs.
pub mod loader;
/// Image source references: paths, data URLs and in-memory bytes.
pub mod source;
pub(crate) mod svg_raster;
