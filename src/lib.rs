//! Thumbforge composites blog/video thumbnails on the CPU.
//!
//! One [`CompositingEngine`] owns a fixed-size surface and paints, in order:
//!
//! - a cover-fit, blurred background image with a contrast overlay
//! - a title fitted to at most a few lines and painted with drop and inner shadows
//! - a centered row of one to four icons, each over its own drop shadow
//!
//! Inputs are [`ImageSource`]s (paths, data URLs, bytes or decoded images); all of them are
//! decoded before anything is painted, so a failed call leaves the previous frame intact.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Input resolution and decoding.
pub mod assets;
/// JSON configuration.
pub mod config;
/// Pixel effects: blur, compositing, shadows.
pub mod effects;
/// The compositing engine.
pub mod engine;
/// Errors and core pixel/geometry types.
pub mod foundation;
/// Pure layout math for the paint stages.
pub mod layout;
/// Encoding and export of results.
pub mod output;
/// CPU painting stages over a surface.
pub mod render;
/// Fonts and shaping.
pub mod text;

pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::source::ImageSource;
pub use crate::config::color::Color;
pub use crate::config::model::{OutputFormat, ThumbnailConfig};
pub use crate::engine::compositor::{CompositingEngine, Generation};
pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ThumbError, ThumbResult};
pub use crate::layout::background::{CoverFit, cover_fit};
pub use crate::layout::icons::IconRow;
pub use crate::layout::typography::TextLayout;
pub use crate::output::encode::encode;
pub use crate::output::layers::export_layers;
pub use crate::output::naming::thumbnail_file_name;
pub use crate::render::surface::FrameRGBA;
pub use crate::text::font::FontFace;
