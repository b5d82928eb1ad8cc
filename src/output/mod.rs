//! Encoding, file naming and layer export of generated thumbnails.

/// PNG/JPEG encoding of frames.
pub mod encode;
/// Layer export for external editing.
pub mod layers;
/// Output file names derived from titles.
pub mod naming;
