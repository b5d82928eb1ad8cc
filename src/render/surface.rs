use std::sync::Arc;

use crate::{
    assets::decode::DecodedImage,
    effects::composite::{BlendMode, PremulRgba8, composite_at},
    foundation::core::{Affine, Canvas, Rect},
    foundation::error::{ThumbError, ThumbResult},
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from a [`Surface`] are premultiplied; the flag makes this explicit at
/// API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Positioned premultiplied RGBA8 buffer, composited onto a [`Surface`] as a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    /// Left edge in canvas pixels.
    pub x: i32,
    /// Top edge in canvas pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4`.
    pub data: Vec<u8>,
}

impl Layer {
    /// Fully transparent layer.
    pub fn transparent(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Tight bounds `(x0, y0, x1, y1)` of pixels with non-zero alpha, in layer coordinates.
    pub fn alpha_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let w = self.width as usize;
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (y, row) in self.data.chunks_exact(w.max(1) * 4).enumerate() {
            let mut xs = row
                .chunks_exact(4)
                .enumerate()
                .filter(|(_, px)| px[3] != 0)
                .map(|(x, _)| x as u32);
            let Some(first) = xs.next() else {
                continue;
            };
            let last = xs.last().unwrap_or(first);
            let y = y as u32;
            bounds = Some(match bounds {
                None => (first, y, last + 1, y + 1),
                Some((x0, y0, x1, _)) => (x0.min(first), y0, x1.max(last + 1), y + 1),
            });
        }
        bounds
    }

    /// Sub-rectangle `(x0, y0, x1, y1)` in layer coordinates, keeping canvas placement.
    pub fn crop(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        let (x0, y0) = (x0.min(x1), y0.min(y1));
        let (cw, ch) = (x1 - x0, y1 - y0);
        let mut data = Vec::with_capacity((cw as usize) * (ch as usize) * 4);
        let row_len = self.width as usize * 4;
        for y in y0..y1 {
            let start = y as usize * row_len + x0 as usize * 4;
            data.extend_from_slice(&self.data[start..start + cw as usize * 4]);
        }
        Self {
            x: self.x + x0 as i32,
            y: self.y + y0 as i32,
            width: cw,
            height: ch,
            data,
        }
    }

    /// Copy of this layer with `pad` transparent pixels on every side.
    pub fn padded(&self, pad: u32) -> Self {
        let mut out = Self::transparent(
            self.x - pad as i32,
            self.y - pad as i32,
            self.width + 2 * pad,
            self.height + 2 * pad,
        );
        let src_row = self.width as usize * 4;
        let dst_row = out.width as usize * 4;
        for y in 0..self.height as usize {
            let dst_start = (y + pad as usize) * dst_row + pad as usize * 4;
            out.data[dst_start..dst_start + src_row]
                .copy_from_slice(&self.data[y * src_row..(y + 1) * src_row]);
        }
        out
    }
}

/// The single raster target of a generation, backed by a `vello_cpu` pixmap.
pub struct Surface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a transparent surface for `canvas`.
    pub fn new(canvas: Canvas) -> ThumbResult<Self> {
        let (w, h) = canvas_u16(canvas)?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Surface geometry.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied RGBA8 pixels.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Mutable premultiplied RGBA8 pixels.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: PremulRgba8) {
        for px in self.data_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Copy of the current pixels.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data().to_vec(),
            premultiplied: true,
        }
    }

    /// Composite `layer` at its canvas position.
    pub fn composite(&mut self, layer: &Layer, opacity: f64, blend: BlendMode) -> ThumbResult<()> {
        let Canvas { width, height } = self.canvas;
        composite_at(
            self.data_mut(),
            width,
            height,
            &layer.data,
            layer.width,
            layer.height,
            layer.x,
            layer.y,
            opacity,
            blend,
        )
    }

    /// Rasterize vector content into a fresh transparent layer covering the whole canvas.
    pub fn render_layer(
        &self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext, Affine),
    ) -> ThumbResult<Layer> {
        render_layer_in(self.canvas.rect(), draw)
    }
}

/// Rasterize vector content into a transparent layer covering `region` (canvas coordinates,
/// snapped outward to whole pixels).
///
/// `draw` receives the context and the canvas-to-layer transform; any transform it sets must
/// be prefixed with that affine. The context starts with it already applied.
pub fn render_layer_in(
    region: Rect,
    draw: impl FnOnce(&mut vello_cpu::RenderContext, Affine),
) -> ThumbResult<Layer> {
    let x0 = region.x0.floor();
    let y0 = region.y0.floor();
    let w = (region.x1.ceil() - x0).max(1.0);
    let h = (region.y1.ceil() - y0).max(1.0);
    if !(w.is_finite() && h.is_finite()) || w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
        return Err(ThumbError::render(format!(
            "layer region {region:?} exceeds the surface limit"
        )));
    }
    let (w, h) = (w as u16, h as u16);

    let base = Affine::translate((-x0, -y0));
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(affine_to_cpu(base));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    draw(&mut ctx, base);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(Layer {
        x: x0 as i32,
        y: y0 as i32,
        width: u32::from(w),
        height: u32::from(h),
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

fn canvas_u16(canvas: Canvas) -> ThumbResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| ThumbError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| ThumbError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

/// Convert a crate-level affine to the `vello_cpu` kurbo version.
pub fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Wrap a decoded image as a `vello_cpu` image paint.
pub fn image_paint(image: &DecodedImage) -> ThumbResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Build a `vello_cpu` pixmap from premultiplied RGBA8 bytes.
pub fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ThumbResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ThumbError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ThumbError::render("pixmap height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(ThumbError::render(
            "pixmap bytes must match width*height*4",
        ));
    }

    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
