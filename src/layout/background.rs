use crate::foundation::core::{Canvas, Rect};

/// Placement of a scaled background image on the canvas.
///
/// `width >= canvas.width` and `height >= canvas.height` always hold; the image is centered,
/// so `x` and `y` are zero or negative.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CoverFit {
    /// Left edge of the scaled image.
    pub x: f64,
    /// Top edge of the scaled image.
    pub y: f64,
    /// Scaled width.
    pub width: f64,
    /// Scaled height.
    pub height: f64,
}

impl CoverFit {
    /// Destination rectangle on the canvas.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Uniform scale from source pixels to canvas pixels.
    pub fn scale_for(&self, src_width: u32) -> f64 {
        self.width / f64::from(src_width.max(1))
    }
}

/// Cover-fit a `src_width x src_height` image onto `canvas`.
///
/// The aspect comparison is an exact integer cross-multiplication. Wider sources fill the
/// canvas height, everything else (including equal aspect) fills the width; for equal
/// aspect ratios both branches produce the same exact result.
pub fn cover_fit(src_width: u32, src_height: u32, canvas: Canvas) -> CoverFit {
    let (sw, sh) = (u64::from(src_width.max(1)), u64::from(src_height.max(1)));
    let (cw, ch) = (u64::from(canvas.width), u64::from(canvas.height));

    if sw * ch > cw * sh {
        return fit_to_height(src_width, src_height, canvas);
    }
    let height = (sh * cw) as f64 / sw as f64;
    CoverFit {
        x: 0.0,
        y: (ch as f64 - height) / 2.0,
        width: cw as f64,
        height,
    }
}

/// The height-driven branch alone: scaled height equals the canvas height.
pub fn fit_to_height(src_width: u32, src_height: u32, canvas: Canvas) -> CoverFit {
    let (sw, sh) = (u64::from(src_width.max(1)), u64::from(src_height.max(1)));
    let (cw, ch) = (u64::from(canvas.width), u64::from(canvas.height));
    let width = (sw * ch) as f64 / sh as f64;
    CoverFit {
        x: (cw as f64 - width) / 2.0,
        y: 0.0,
        width,
        height: ch as f64,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/background.rs"]
mod tests;
