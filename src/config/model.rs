use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    config::color::Color,
    foundation::core::Canvas,
    foundation::error::{ThumbError, ThumbResult},
};

/// Hard upper bound on icons in one row.
pub const MAX_ICONS: usize = 4;

/// Complete engine configuration. Every field has a default, so partial JSON is accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Output geometry and background softening.
    pub canvas: CanvasConfig,
    /// Title typography constraints.
    pub font: FontConfig,
    /// Shadow parameters for text and icons.
    pub effects: EffectConfig,
    /// Icon-row geometry.
    pub icons: IconConfig,
    /// Encoding of the final raster.
    pub output: OutputConfig,
}

/// Canvas geometry; immutable once an engine is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Background blur strength (standard deviation in pixels).
    pub blur_radius: f64,
    /// Maximum number of icons painted (at most [`MAX_ICONS`]); extra icons are ignored.
    pub max_icons: usize,
    /// Color of the contrast overlay laid over the blurred background.
    pub overlay_color: Color,
    /// Opacity of the contrast overlay.
    pub overlay_opacity: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            blur_radius: 20.0,
            max_icons: 4,
            overlay_color: Color::black(),
            overlay_opacity: 0.1,
        }
    }
}

/// Title font selection and fitting constraints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Family names in preference order, queried bold + italic.
    pub families: Vec<String>,
    /// Explicit font file; skips the system font lookup when set.
    pub path: Option<PathBuf>,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Starting (largest) font size in pixels.
    pub base_size: f64,
    /// Smallest font size the fit may choose.
    pub min_size: f64,
    /// Size decrement between fit attempts.
    pub step: f64,
    /// Maximum number of title lines.
    pub max_lines: usize,
    /// Maximum line width as a fraction of canvas width.
    pub max_width_frac: f64,
    /// Maximum text block height as a fraction of canvas height.
    pub max_height_frac: f64,
    /// Line-height factor used when checking the block height during fitting.
    pub fit_line_height: f64,
    /// Line spacing factor used when painting.
    pub line_spacing: f64,
    /// Glyph fill color.
    pub fill: Color,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            families: vec![
                "Alliance No.2".to_string(),
                "Liberation Sans".to_string(),
                "DejaVu Sans".to_string(),
            ],
            path: None,
            font_dirs: Vec::new(),
            base_size: 160.0,
            min_size: 100.0,
            step: 8.0,
            max_lines: 2,
            max_width_frac: 0.85,
            max_height_frac: 0.45,
            fit_line_height: 1.1,
            line_spacing: 1.2,
            fill: Color::white(),
        }
    }
}

/// Offset, blurred, tinted copy painted beneath an element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropShadow {
    /// Shadow opacity multiplier.
    pub opacity: f64,
    /// Offset applied on both axes, in pixels.
    pub distance: f64,
    /// Blur amount with canvas `shadowBlur` semantics (sigma = blur / 2).
    pub blur: f64,
    /// Shadow tint.
    pub color: Color,
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            opacity: 0.85,
            distance: 9.0,
            blur: 40.0,
            color: Color::black(),
        }
    }
}

/// Offset duplicate multiplied over the glyph fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnerShadow {
    /// Shadow opacity multiplier.
    pub opacity: f64,
    /// Offset direction in degrees (0 = +x, 90 = +y).
    pub angle_deg: f64,
    /// Offset length in pixels.
    pub distance: f64,
    /// Shadow tint.
    pub color: Color,
}

impl Default for InnerShadow {
    fn default() -> Self {
        Self {
            opacity: 0.45,
            angle_deg: 30.0,
            distance: 8.0,
            color: Color::black(),
        }
    }
}

impl InnerShadow {
    /// `(distance * cos(angle), distance * sin(angle))`.
    pub fn offset(&self) -> (f64, f64) {
        let angle = self.angle_deg.to_radians();
        (angle.cos() * self.distance, angle.sin() * self.distance)
    }
}

/// Title shadow pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextEffects {
    /// Outer shadow painted before the fill.
    pub drop_shadow: DropShadow,
    /// Multiply pass painted after the fill.
    pub inner_shadow: InnerShadow,
}

/// Icon shadow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconEffects {
    /// Outer shadow painted before each icon.
    pub drop_shadow: DropShadow,
}

/// Per-element shadow parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Title effects.
    pub text: TextEffects,
    /// Icon effects.
    pub icons: IconEffects,
}

/// Icon-row geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Preferred icon edge length.
    pub base_size: f64,
    /// Lower clamp on the icon edge length.
    pub min_size: f64,
    /// Upper clamp on the icon edge length.
    pub max_size: f64,
    /// Gap between icons as a fraction of the icon size.
    pub gap_frac: f64,
    /// Maximum row width as a fraction of canvas width.
    pub row_width_frac: f64,
    /// Vertical center of the row as a fraction of canvas height.
    pub anchor_y_frac: f64,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            base_size: 280.0,
            min_size: 180.0,
            max_size: 320.0,
            gap_frac: 0.15,
            row_width_frac: 0.8,
            anchor_y_frac: 0.78,
        }
    }
}

/// Encoded output container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG using [`OutputConfig::quality`].
    Jpeg,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Output encoding settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Container format.
    pub format: OutputFormat,
    /// Quality in `0..=1` (ignored by PNG).
    pub quality: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: 0.9,
        }
    }
}

impl ThumbnailConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(text: &str) -> ThumbResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| ThumbError::validation(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Output canvas described by [`CanvasConfig`].
    pub fn canvas(&self) -> ThumbResult<Canvas> {
        Canvas::new(self.canvas.width, self.canvas.height)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> ThumbResult<()> {
        self.canvas()?;

        fn finite_non_negative(name: &str, v: f64) -> ThumbResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(ThumbError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }
        fn unit_interval(name: &str, v: f64) -> ThumbResult<()> {
            if !(0.0..=1.0).contains(&v) {
                return Err(ThumbError::validation(format!("{name} must be in 0..=1")));
            }
            Ok(())
        }

        let c = &self.canvas;
        finite_non_negative("canvas.blur_radius", c.blur_radius)?;
        if c.max_icons > MAX_ICONS {
            return Err(ThumbError::validation(format!(
                "canvas.max_icons must be <= {MAX_ICONS}"
            )));
        }
        unit_interval("canvas.overlay_opacity", c.overlay_opacity)?;

        let f = &self.font;
        if !f.min_size.is_finite() || f.min_size <= 0.0 {
            return Err(ThumbError::validation("font.min_size must be > 0"));
        }
        if !f.base_size.is_finite() || f.min_size > f.base_size {
            return Err(ThumbError::validation(
                "font.min_size must be <= font.base_size",
            ));
        }
        if !f.step.is_finite() || f.step <= 0.0 {
            return Err(ThumbError::validation("font.step must be > 0"));
        }
        if f.max_lines == 0 {
            return Err(ThumbError::validation("font.max_lines must be >= 1"));
        }
        if !(f.max_width_frac > 0.0 && f.max_width_frac <= 1.0) {
            return Err(ThumbError::validation("font.max_width_frac must be in (0, 1]"));
        }
        if !(f.max_height_frac > 0.0 && f.max_height_frac <= 1.0) {
            return Err(ThumbError::validation(
                "font.max_height_frac must be in (0, 1]",
            ));
        }
        if !(f.fit_line_height > 0.0 && f.line_spacing > 0.0) {
            return Err(ThumbError::validation(
                "font.fit_line_height and font.line_spacing must be > 0",
            ));
        }

        for (name, s) in [
            ("effects.text.drop_shadow", &self.effects.text.drop_shadow),
            ("effects.icons.drop_shadow", &self.effects.icons.drop_shadow),
        ] {
            unit_interval(&format!("{name}.opacity"), s.opacity)?;
            finite_non_negative(&format!("{name}.blur"), s.blur)?;
            if !s.distance.is_finite() {
                return Err(ThumbError::validation(format!(
                    "{name}.distance must be finite"
                )));
            }
        }
        let inner = &self.effects.text.inner_shadow;
        unit_interval("effects.text.inner_shadow.opacity", inner.opacity)?;
        if !inner.distance.is_finite() || !inner.angle_deg.is_finite() {
            return Err(ThumbError::validation(
                "effects.text.inner_shadow angle/distance must be finite",
            ));
        }

        let i = &self.icons;
        if !(i.min_size > 0.0 && i.min_size <= i.max_size) {
            return Err(ThumbError::validation(
                "icons.min_size must be > 0 and <= icons.max_size",
            ));
        }
        if !(i.base_size > 0.0) {
            return Err(ThumbError::validation("icons.base_size must be > 0"));
        }
        finite_non_negative("icons.gap_frac", i.gap_frac)?;
        if !(i.row_width_frac > 0.0 && i.row_width_frac <= 1.0) {
            return Err(ThumbError::validation(
                "icons.row_width_frac must be in (0, 1]",
            ));
        }
        unit_interval("icons.anchor_y_frac", i.anchor_y_frac)?;

        unit_interval("output.quality", f64::from(self.output.quality))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
