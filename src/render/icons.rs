use crate::{
    assets::decode::DecodedImage,
    config::model::{DropShadow, IconConfig, MAX_ICONS},
    effects::{composite::BlendMode, shadow::drop_shadow_layer},
    foundation::core::Affine,
    foundation::error::ThumbResult,
    layout::icons::{IconRow, icon_row},
    render::surface::{Surface, affine_to_cpu, image_paint, render_layer_in},
};

/// Paint up to `max_icons` icons in a centered row, each stretched to its square slot and
/// drawn over its drop shadow. `max_icons` is capped at [`MAX_ICONS`]; extra entries are
/// ignored and zero icons is a no-op.
#[tracing::instrument(skip_all, fields(icons = icons.len()))]
pub fn paint_icons(
    surface: &mut Surface,
    icons: &[DecodedImage],
    cfg: &IconConfig,
    shadow: &DropShadow,
    max_icons: usize,
) -> ThumbResult<Option<IconRow>> {
    let max_icons = max_icons.min(MAX_ICONS);
    let icons = if icons.len() > max_icons {
        tracing::warn!(
            supplied = icons.len(),
            max_icons,
            "ignoring icons beyond the configured maximum"
        );
        &icons[..max_icons]
    } else {
        icons
    };

    let Some(row) = icon_row(icons.len(), surface.canvas(), cfg) else {
        return Ok(None);
    };

    for (icon, slot) in icons.iter().zip(&row.slots) {
        let paint = image_paint(icon)?;
        let (w, h) = (f64::from(icon.width), f64::from(icon.height));
        let layer = render_layer_in(*slot, |ctx, base| {
            let xf = base
                * Affine::translate((slot.x0, slot.y0))
                * Affine::scale_non_uniform(slot.width() / w, slot.height() / h);
            ctx.set_transform(affine_to_cpu(xf));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        })?;

        if let Some(shadow_layer) = drop_shadow_layer(&layer, shadow)? {
            surface.composite(&shadow_layer, 1.0, BlendMode::Normal)?;
        }
        surface.composite(&layer, 1.0, BlendMode::Normal)?;
    }

    tracing::debug!(size = row.size, gap = row.gap, "icon row painted");
    Ok(Some(row))
}

#[cfg(test)]
#[path = "../../tests/unit/render/icons.rs"]
mod tests;
