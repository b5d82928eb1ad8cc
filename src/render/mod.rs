//! CPU painting: the surface plus the background, title and icon stages.
//!
//! Each stage is a free function over `(&mut Surface, inputs)` so it can run without the
//! engine. Vector content (images, glyph runs) is rasterized with `vello_cpu` into
//! transparent layers, which are then composited onto the surface.

/// Background stage.
pub mod background;
/// Icon stage.
pub mod icons;
/// Drawing surface, layers and frames.
pub mod surface;
/// Title stage.
pub mod title;
