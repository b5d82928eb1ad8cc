use rayon::prelude::*;

use crate::foundation::{
    error::{ThumbError, ThumbResult},
    math::{mul_div255_u8, opacity_u8},
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// How a layer combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Porter-Duff source-over.
    #[default]
    Normal,
    /// Separable multiply, composited source-over.
    Multiply,
}

/// Source-over of `src` (scaled by `opacity`) onto `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f64) -> PremulRgba8 {
    let op = opacity_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Multiply blend in premultiplied form: `s * (1 - da) + d * (1 - sa) + s * d`.
pub fn multiply(dst: PremulRgba8, src: PremulRgba8, opacity: f64) -> PremulRgba8 {
    let op = opacity_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let s: [u16; 4] = std::array::from_fn(|i| u16::from(mul_div255_u8(u16::from(src[i]), op)));
    let sa = s[3];
    let da = u16::from(dst[3]);

    let mut out = [0u8; 4];
    out[3] = (sa as u8).saturating_add(mul_div255_u8(da, 255 - sa));
    for i in 0..3 {
        let d = u16::from(dst[i]);
        let v = u16::from(mul_div255_u8(s[i], 255 - da))
            + u16::from(mul_div255_u8(d, 255 - sa))
            + u16::from(mul_div255_u8(s[i], d));
        out[i] = v.min(255) as u8;
    }
    out
}

/// Composite a `src_w x src_h` premultiplied buffer onto `dst` with its top-left corner at
/// `(x, y)`. Parts outside the destination are clipped.
#[allow(clippy::too_many_arguments)]
pub fn composite_at(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i32,
    y: i32,
    opacity: f64,
    blend: BlendMode,
) -> ThumbResult<()> {
    if dst.len() != (dst_w as usize) * (dst_h as usize) * 4 {
        return Err(ThumbError::render(
            "composite_at expects dst matching dst_w*dst_h*4",
        ));
    }
    if src.len() != (src_w as usize) * (src_h as usize) * 4 {
        return Err(ThumbError::render(
            "composite_at expects src matching src_w*src_h*4",
        ));
    }

    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + i64::from(src_w)).min(i64::from(dst_w));
    let y1 = (i64::from(y) + i64::from(src_h)).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 || opacity <= 0.0 {
        return Ok(());
    }

    let row_len = dst_w as usize * 4;
    let src_row_len = src_w as usize * 4;
    let (x0, x1, y0, y1) = (x0 as usize, x1 as usize, y0 as usize, y1 as usize);
    let sx0 = (x0 as i64 - i64::from(x)) as usize;
    let sy0 = (y0 as i64 - i64::from(y)) as usize;

    dst.par_chunks_mut(row_len)
        .enumerate()
        .skip(y0)
        .take(y1 - y0)
        .for_each(|(dy, row)| {
            let sy = sy0 + (dy - y0);
            let src_row = &src[sy * src_row_len..(sy + 1) * src_row_len];
            let d_px = row[x0 * 4..x1 * 4].chunks_exact_mut(4);
            let s_px = src_row[sx0 * 4..(sx0 + (x1 - x0)) * 4].chunks_exact(4);
            for (d, s) in d_px.zip(s_px) {
                let dp = [d[0], d[1], d[2], d[3]];
                let sp = [s[0], s[1], s[2], s[3]];
                let out = match blend {
                    BlendMode::Normal => over(dp, sp, opacity),
                    BlendMode::Multiply => multiply(dp, sp, opacity),
                };
                d.copy_from_slice(&out);
            }
        });
    Ok(())
}

/// Source-over a solid premultiplied color across the whole buffer.
pub fn fill_over(dst: &mut [u8], color: PremulRgba8) {
    if color[3] == 0 {
        return;
    }
    dst.par_chunks_exact_mut(4).for_each(|d| {
        let out = over([d[0], d[1], d[2], d[3]], color, 1.0);
        d.copy_from_slice(&out);
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
