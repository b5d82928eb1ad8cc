use crate::{
    assets::decode::DecodedImage,
    foundation::error::{ThumbError, ThumbResult},
};

const MAX_DIM: u32 = 16_384;

/// Raster size for an SVG whose longer side becomes `long_side` pixels.
pub(crate) fn svg_raster_size(tree: &usvg::Tree, long_side: u32) -> ThumbResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (f64::from(size.width()), f64::from(size.height()));
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(ThumbError::image_decode("svg has invalid width/height"));
    }
    let scale = f64::from(long_side) / w.max(h);
    let rw = (w * scale).round().max(1.0) as u32;
    let rh = (h * scale).round().max(1.0) as u32;
    if rw > MAX_DIM || rh > MAX_DIM {
        return Err(ThumbError::image_decode(format!(
            "svg raster size too large: {rw}x{rh} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((rw, rh))
}

/// Parse `bytes` as SVG and rasterize it to premultiplied RGBA8.
pub(crate) fn rasterize_svg(bytes: &[u8], long_side: u32) -> ThumbResult<DecodedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| ThumbError::image_decode(format!("parse svg: {e}")))?;
    let (width, height) = svg_raster_size(&tree, long_side)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ThumbError::image_decode("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied RGBA8.
    DecodedImage::from_premul_rgba8(width, height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
