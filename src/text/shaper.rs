use std::borrow::Cow;

use crate::{
    foundation::error::{ThumbError, ThumbResult},
    layout::typography::TextMeasure,
    text::font::FontFace,
};

/// One shaped line, positioned relative to its alphabetic baseline origin.
#[derive(Clone, Debug, Default)]
pub struct ShapedLine {
    /// Glyphs with `x` measured from the line start and `y` from the baseline.
    pub glyphs: Vec<vello_cpu::Glyph>,
    /// Advance width, excluding trailing whitespace.
    pub width: f64,
    /// Distance from baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from baseline to the bottom of the line box.
    pub descent: f64,
    /// Font size the line was shaped at.
    pub font_size: f32,
    /// Collection index of the face parley shaped with, if any glyphs were produced.
    pub font_index: Option<u32>,
}

/// Parley-backed shaper bound to a single font face.
pub struct TextShaper {
    face: FontFace,
    family_name: String,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    font_data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("face", &self.face)
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl TextShaper {
    /// Register `face` with a fresh parley font context.
    pub fn new(face: FontFace) -> ThumbResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        // A collection can hold several families; use the one owning the selected face.
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| ThumbError::font("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::font("registered font family has no name"))?
            .to_string();

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
            face.index,
        );

        Ok(Self {
            face,
            family_name,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font_data,
        })
    }

    /// Face this shaper draws with.
    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Font handle for `vello_cpu` glyph runs.
    pub fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }

    /// Shape `text` as a single unwrapped line.
    pub fn shape_line(&mut self, text: &str, size_px: f32) -> ThumbResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        if text.is_empty() {
            return Ok(ShapedLine {
                font_size: size_px,
                ..ShapedLine::default()
            });
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(self.face.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::FontStyle(if self.face.italic {
            parley::style::FontStyle::Italic
        } else {
            parley::style::FontStyle::Normal
        }));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut out = ShapedLine {
            font_size: size_px,
            ..ShapedLine::default()
        };
        let Some(line) = layout.lines().next() else {
            return Ok(out);
        };
        let metrics = line.metrics();
        let baseline = metrics.baseline;
        out.width = f64::from((metrics.advance - metrics.trailing_whitespace).max(0.0));
        out.ascent = f64::from(metrics.ascent);
        out.descent = f64::from(metrics.descent.abs());

        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let shaped_index = run.run().font().index;
            if shaped_index != self.face.index {
                tracing::debug!(
                    shaped_index,
                    drawn_index = self.face.index,
                    "glyph run shaped with a different face index"
                );
            }
            out.font_index.get_or_insert(shaped_index);
            out.glyphs
                .extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
        }
        Ok(out)
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str, size_px: f64) -> f64 {
        match self.shape_line(text, size_px as f32) {
            Ok(line) => line.width,
            Err(e) => {
                tracing::warn!(error = %e, "text measurement failed");
                f64::INFINITY
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
