use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;

use crate::{
    config::model::OutputFormat,
    foundation::core::unpremultiply_rgba8_in_place,
    foundation::error::{ThumbError, ThumbResult},
    render::surface::FrameRGBA,
};

/// Map a `0..=1` quality to the JPEG encoder's `1..=100` scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Straight-alpha RGBA image for a frame.
pub fn frame_to_rgba_image(frame: &FrameRGBA) -> ThumbResult<image::RgbaImage> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| ThumbError::encode("frame bytes do not match width*height*4"))
}

/// Encode `frame` as PNG or JPEG.
pub fn encode(frame: &FrameRGBA, format: OutputFormat, quality: f32) -> ThumbResult<Vec<u8>> {
    let img = image::DynamicImage::ImageRgba8(frame_to_rgba_image(frame)?);
    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Png => {
            img.write_to(&mut buf, image::ImageFormat::Png)
                .map_err(|e| ThumbError::encode(format!("PNG encode failed: {e}")))?;
        }
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality));
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| ThumbError::encode(format!("JPEG encode failed: {e}")))?;
        }
    }

    Ok(buf.into_inner())
}

/// Encode `frame` and write it to `path`.
pub fn write_frame(
    path: impl AsRef<Path>,
    frame: &FrameRGBA,
    format: OutputFormat,
    quality: f32,
) -> ThumbResult<()> {
    let path = path.as_ref();
    let bytes = encode(frame, format, quality)?;
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/encode.rs"]
mod tests;
