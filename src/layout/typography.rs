use crate::{config::model::FontConfig, foundation::core::Canvas};

/// Width measurement of a single unwrapped line at a given font size.
pub trait TextMeasure {
    /// Advance width of `text` in pixels at `size_px`.
    fn measure(&mut self, text: &str, size_px: f64) -> f64;
}

/// Constraints for fitting a title.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypographyParams {
    /// First (largest) size tried.
    pub base_size: f64,
    /// Smallest size allowed.
    pub min_size: f64,
    /// Size decrement per attempt.
    pub step: f64,
    /// Maximum line count.
    pub max_lines: usize,
    /// Maximum line width in pixels.
    pub max_width: f64,
    /// Maximum block height in pixels.
    pub max_height: f64,
    /// Line-height factor used for the block height check.
    pub fit_line_height: f64,
}

impl TypographyParams {
    /// Resolve fractional limits against the canvas.
    pub fn from_config(font: &FontConfig, canvas: Canvas) -> Self {
        Self {
            base_size: font.base_size,
            min_size: font.min_size,
            step: font.step,
            max_lines: font.max_lines.max(1),
            max_width: canvas.w() * font.max_width_frac,
            max_height: canvas.h() * font.max_height_frac,
            fit_line_height: font.fit_line_height,
        }
    }

    fn fits(&self, lines: &[String], size: f64) -> bool {
        lines.len() <= self.max_lines
            && lines.len() as f64 * size * self.fit_line_height <= self.max_height
    }
}

/// Chosen title size and its wrapped lines.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextLayout {
    /// Font size in pixels, within `[min_size, base_size]`.
    pub font_size: f64,
    /// Lines in paint order; never more than `max_lines`.
    pub lines: Vec<String>,
    /// Whether no size satisfied the constraints and lines were truncated at the minimum size.
    pub truncated: bool,
}

/// Greedy word wrap: a word joins the current line unless the joined candidate measured at
/// `size_px` exceeds `max_width`. A single over-wide word stays alone on its own line.
pub fn wrap_text(
    text: &str,
    size_px: f64,
    max_width: f64,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure.measure(&candidate, size_px) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Pick the largest size (stepping down from base) whose wrap satisfies both the line-count
/// and block-height limits.
///
/// Sizes tried are `base, base - step, ...` while strictly above `min_size`, then `min_size`
/// itself. If nothing fits, the minimum-size wrap is truncated to `max_lines`. Never fails.
#[tracing::instrument(skip(measure), fields(chars = text.chars().count()))]
pub fn fit_title(
    text: &str,
    params: &TypographyParams,
    measure: &mut dyn TextMeasure,
) -> TextLayout {
    let step = if params.step.is_finite() && params.step > 0.0 {
        params.step
    } else {
        params.base_size - params.min_size
    };

    let mut size = params.base_size;
    while size > params.min_size {
        let lines = wrap_text(text, size, params.max_width, measure);
        if params.fits(&lines, size) {
            tracing::debug!(size, lines = lines.len(), "title fits");
            return TextLayout {
                font_size: size,
                lines,
                truncated: false,
            };
        }
        if step <= 0.0 {
            break;
        }
        size -= step;
    }

    let size = params.min_size;
    let mut lines = wrap_text(text, size, params.max_width, measure);
    if params.fits(&lines, size) {
        tracing::debug!(size, lines = lines.len(), "title fits at minimum size");
        return TextLayout {
            font_size: size,
            lines,
            truncated: false,
        };
    }

    tracing::debug!(
        size,
        wrapped = lines.len(),
        max_lines = params.max_lines,
        "title does not fit; truncating"
    );
    lines.truncate(params.max_lines);
    TextLayout {
        font_size: size,
        lines,
        truncated: true,
    }
}

/// Middle-baseline y of each line for a block centered on `center_y`.
///
/// Line `i` sits at `center_y - n * lh / 2 + lh / 2 + i * lh` with `lh = size * line_spacing`.
pub fn line_centers(line_count: usize, font_size: f64, line_spacing: f64, center_y: f64) -> Vec<f64> {
    let lh = font_size * line_spacing;
    let n = line_count as f64;
    let start = center_y - n * lh / 2.0 + lh / 2.0;
    (0..line_count).map(|i| start + i as f64 * lh).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/typography.rs"]
mod tests;
