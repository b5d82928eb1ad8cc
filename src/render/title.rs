use crate::{
    config::color::Color,
    config::model::{FontConfig, TextEffects},
    effects::{composite::BlendMode, shadow::drop_shadow_layer},
    foundation::core::{Affine, Rect},
    foundation::error::ThumbResult,
    layout::typography::{TextLayout, line_centers},
    render::surface::{Layer, Surface, affine_to_cpu, render_layer_in},
    text::shaper::{ShapedLine, TextShaper},
};

/// Where one title line is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePlacement {
    /// Left edge of the line's advance box.
    pub x: f64,
    /// Alphabetic baseline.
    pub baseline: f64,
    /// Vertical middle the line is centered on.
    pub center_y: f64,
}

/// Horizontally center a shaped line on `center_x` with its middle at `center_y`.
pub fn place_line(line: &ShapedLine, center_x: f64, center_y: f64) -> LinePlacement {
    LinePlacement {
        x: center_x - line.width / 2.0,
        baseline: center_y + (line.ascent - line.descent) / 2.0,
        center_y,
    }
}

/// Paint every line of `layout`: drop shadow and fill first, then the multiplied inner
/// shadow, line by line.
#[tracing::instrument(skip_all, fields(lines = layout.lines.len(), size = layout.font_size))]
pub fn paint_title(
    surface: &mut Surface,
    shaper: &mut TextShaper,
    layout: &TextLayout,
    font: &FontConfig,
    effects: &TextEffects,
) -> ThumbResult<Vec<LinePlacement>> {
    let canvas = surface.canvas();
    let size = layout.font_size as f32;
    let centers = line_centers(
        layout.lines.len(),
        layout.font_size,
        font.line_spacing,
        canvas.h() / 2.0,
    );

    let mut placements = Vec::with_capacity(layout.lines.len());
    for (text, center_y) in layout.lines.iter().zip(centers) {
        let line = shaper.shape_line(text, size)?;
        if line.glyphs.is_empty() {
            continue;
        }
        let at = place_line(&line, canvas.w() / 2.0, center_y);
        let region = line_region(&line, at, layout.font_size);

        let fill = glyph_layer(shaper, &line, region, (at.x, at.baseline), font.fill)?;
        if let Some(shadow) = drop_shadow_layer(&fill, &effects.drop_shadow)? {
            surface.composite(&shadow, 1.0, BlendMode::Normal)?;
        }
        surface.composite(&fill, 1.0, BlendMode::Normal)?;

        let inner = &effects.inner_shadow;
        let (dx, dy) = inner.offset();
        let shifted = Rect::new(
            region.x0 + dx,
            region.y0 + dy,
            region.x1 + dx,
            region.y1 + dy,
        );
        let inner_layer = glyph_layer(
            shaper,
            &line,
            shifted,
            (at.x + dx, at.baseline + dy),
            inner.color.with_opacity(inner.opacity),
        )?;
        surface.composite(&inner_layer, 1.0, BlendMode::Multiply)?;

        placements.push(at);
    }
    Ok(placements)
}

/// Bounds that safely contain a line's ink, with room for overhangs.
fn line_region(line: &ShapedLine, at: LinePlacement, size: f64) -> Rect {
    let slack = size * 0.5;
    Rect::new(
        at.x - slack,
        at.baseline - line.ascent - slack,
        at.x + line.width + slack,
        at.baseline + line.descent + slack,
    )
}

fn glyph_layer(
    shaper: &TextShaper,
    line: &ShapedLine,
    region: Rect,
    origin: (f64, f64),
    color: Color,
) -> ThumbResult<Layer> {
    let [r, g, b, a] = color.to_rgba8();
    render_layer_in(region, |ctx, base| {
        ctx.set_transform(affine_to_cpu(base * Affine::translate(origin)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.glyph_run(shaper.font_data())
            .font_size(line.font_size)
            .fill_glyphs(line.glyphs.iter().copied());
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/title.rs"]
mod tests;
