use std::sync::Arc;

use crate::{
    assets::svg_raster::rasterize_svg,
    foundation::core::premultiply_rgba8_in_place,
    foundation::error::{ThumbError, ThumbResult},
};

/// Longer side, in pixels, that SVG icons are rasterized at.
pub const SVG_RASTER_LONG_SIDE: u32 = 320;

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> ThumbResult<Self> {
        check_len(width, height, rgba.len())?;
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Wrap pixels that are already premultiplied.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ThumbResult<Self> {
        check_len(width, height, rgba8_premul.len())?;
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

fn check_len(width: u32, height: u32, len: usize) -> ThumbResult<()> {
    if width == 0 || height == 0 {
        return Err(ThumbError::image_decode("image has zero width or height"));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ThumbError::image_decode("image size overflow"))?;
    if expected != len {
        return Err(ThumbError::image_decode(format!(
            "pixel buffer length {len} does not match {width}x{height} rgba8"
        )));
    }
    Ok(())
}

/// Whether `bytes` look like an SVG document (optionally gzip-compressed).
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        return true;
    }
    let head = &bytes[..bytes.len().min(1024)];
    let Ok(text) = std::str::from_utf8(head) else {
        // A multi-byte sequence may be cut at the window edge.
        return String::from_utf8_lossy(head).contains("<svg");
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// Decode raster or SVG bytes.
///
/// Unrecognized, corrupt and truncated data all map to [`ThumbError::ImageDecode`].
pub fn decode_image(bytes: &[u8]) -> ThumbResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(ThumbError::image_decode("image data is empty"));
    }
    if looks_like_svg(bytes) {
        return rasterize_svg(bytes, SVG_RASTER_LONG_SIDE);
    }

    let format = image::guess_format(bytes)
        .map_err(|_| ThumbError::image_decode("unrecognized image format"))?;
    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ThumbError::image_decode(format!("decode {format:?}: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
