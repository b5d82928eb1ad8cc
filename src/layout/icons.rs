use crate::{
    config::model::IconConfig,
    foundation::core::{Canvas, Rect},
};

/// Placement of a single centered icon row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IconRow {
    /// Edge length of each square icon.
    pub size: f64,
    /// Horizontal gap between neighbouring icons.
    pub gap: f64,
    /// Total row width (`count * size + (count - 1) * gap`).
    pub width: f64,
    /// Vertical center line of the row.
    pub center_y: f64,
    /// Destination square of each icon, left to right.
    #[serde(skip)]
    pub slots: Vec<Rect>,
}

/// Icon edge length for `count` icons.
///
/// Uses the base size unless the row would exceed the allowed width, in which case the size
/// is solved from `count * s + (count - 1) * s * gap_frac = row_width_frac * W`. The result
/// is clamped to `[min_size, max_size]`.
pub fn icon_size(count: usize, canvas: Canvas, cfg: &IconConfig) -> f64 {
    let n = count.max(1) as f64;
    let max_row = canvas.w() * cfg.row_width_frac;
    let units = n + (n - 1.0) * cfg.gap_frac;

    let size = if cfg.base_size * units > max_row {
        max_row / units
    } else {
        cfg.base_size
    };
    size.clamp(cfg.min_size, cfg.max_size)
}

/// Row geometry for `count` icons; `None` when there is nothing to place.
pub fn icon_row(count: usize, canvas: Canvas, cfg: &IconConfig) -> Option<IconRow> {
    if count == 0 {
        return None;
    }
    let size = icon_size(count, canvas, cfg);
    let gap = size * cfg.gap_frac;
    let n = count as f64;
    let width = n * size + (n - 1.0) * gap;
    let center_y = canvas.h() * cfg.anchor_y_frac;
    let left = (canvas.w() - width) / 2.0;
    let top = center_y - size / 2.0;

    let slots = (0..count)
        .map(|i| {
            let x = left + i as f64 * (size + gap);
            Rect::new(x, top, x + size, top + size)
        })
        .collect();

    Some(IconRow {
        size,
        gap,
        width,
        center_y,
        slots,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/icons.rs"]
mod tests;
