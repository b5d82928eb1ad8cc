//! Pixel effects over premultiplied RGBA8 buffers.

/// Box-approximated Gaussian blur.
pub mod blur;
/// Source-over and multiply compositing.
pub mod composite;
/// Drop shadows built from a layer's alpha.
pub mod shadow;
