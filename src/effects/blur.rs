use rayon::prelude::*;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Number of box passes used to approximate a Gaussian.
const PASSES: usize = 3;

/// Blur a premultiplied RGBA8 buffer with standard deviation `sigma`.
///
/// Three separable box passes approximate the Gaussian; samples outside the image clamp
/// to the nearest edge pixel. `sigma <= 0` returns the input unchanged.
pub fn blur_rgba8_premul(src: &[u8], width: u32, height: u32, sigma: f64) -> ThumbResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ThumbError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ThumbError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if !sigma.is_finite() {
        return Err(ThumbError::validation("blur sigma must be finite"));
    }

    let mut out = src.to_vec();
    blur_in_place(&mut out, width, height, sigma);
    Ok(out)
}

/// In-place variant of [`blur_rgba8_premul`]; the buffer length must be `width*height*4`.
pub fn blur_in_place(buf: &mut [u8], width: u32, height: u32, sigma: f64) {
    if sigma <= 0.0 || width == 0 || height == 0 {
        return;
    }
    let radii = box_radii(sigma);
    if radii.iter().all(|&r| r == 0) {
        return;
    }
    let (w, h) = (width as usize, height as usize);
    let mut tmp = vec![0u8; buf.len()];
    for &r in &radii {
        if r == 0 {
            continue;
        }
        horizontal_pass(buf, &mut tmp, w, r);
        vertical_pass(&tmp, buf, w, h, r);
    }
}

/// Box radii whose successive application matches a Gaussian of `sigma`.
pub fn box_radii(sigma: f64) -> [usize; PASSES] {
    if !(sigma > 0.0) {
        return [0; PASSES];
    }
    let n = PASSES as f64;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f64;
    let m_ideal = (12.0 * sigma * sigma - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    let mut out = [0usize; PASSES];
    for (i, r) in out.iter_mut().enumerate() {
        let size = if i < m { wl } else { wu };
        *r = ((size - 1) / 2) as usize;
    }
    out
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], w: usize, r: usize) {
    let row_len = w * 4;
    dst.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(out, row)| box_row(row, out, w, r));
}

fn box_row(row: &[u8], out: &mut [u8], w: usize, r: usize) {
    let d = (2 * r + 1) as u32;
    let last = w - 1;
    let px = |x: usize, c: usize| u32::from(row[x.min(last) * 4 + c]);

    let mut acc = [0u32; 4];
    for (c, a) in acc.iter_mut().enumerate() {
        *a = px(0, c) * (r as u32 + 1);
        for i in 1..=r {
            *a += px(i, c);
        }
    }
    for x in 0..w {
        for c in 0..4 {
            out[x * 4 + c] = ((acc[c] + d / 2) / d) as u8;
            let add = px(x + r + 1, c);
            let sub = px(x.saturating_sub(r), c);
            acc[c] = acc[c] + add - sub;
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], w: usize, h: usize, r: usize) {
    let d = (2 * r + 1) as u32;
    let row_len = w * 4;
    let last = h - 1;
    let row = |y: usize| &src[y.min(last) * row_len..(y.min(last) + 1) * row_len];

    let mut acc: Vec<u32> = row(0).iter().map(|&v| u32::from(v) * (r as u32 + 1)).collect();
    for y in 1..=r {
        for (a, &v) in acc.iter_mut().zip(row(y)) {
            *a += u32::from(v);
        }
    }

    for y in 0..h {
        let out = &mut dst[y * row_len..(y + 1) * row_len];
        for (o, &a) in out.iter_mut().zip(&acc) {
            *o = ((a + d / 2) / d) as u8;
        }
        let add = row(y + r + 1);
        let sub = row(y.saturating_sub(r));
        for ((a, &p), &m) in acc.iter_mut().zip(add).zip(sub) {
            *a = *a + u32::from(p) - u32::from(m);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
