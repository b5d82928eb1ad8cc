use crate::{
    assets::decode::DecodedImage,
    config::model::CanvasConfig,
    effects::{
        blur::blur_in_place,
        composite::{BlendMode, fill_over},
    },
    foundation::core::Affine,
    foundation::error::ThumbResult,
    layout::background::{CoverFit, cover_fit},
    render::surface::{Surface, affine_to_cpu, image_paint},
};

/// Clear to opaque black, draw `image` cover-fit and centered, blur it, then lay the
/// contrast overlay across the full canvas.
#[tracing::instrument(skip(surface, image, cfg), fields(src_w = image.width, src_h = image.height))]
pub fn paint_background(
    surface: &mut Surface,
    image: &DecodedImage,
    cfg: &CanvasConfig,
) -> ThumbResult<CoverFit> {
    let canvas = surface.canvas();
    let fit = cover_fit(image.width, image.height, canvas);
    let paint = image_paint(image)?;
    let (src_w, src_h) = (f64::from(image.width), f64::from(image.height));

    let layer = surface.render_layer(|ctx, base| {
        let xf = base
            * Affine::translate((fit.x, fit.y))
            * Affine::scale_non_uniform(fit.width / src_w, fit.height / src_h);
        ctx.set_transform(affine_to_cpu(xf));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, src_w, src_h));
    })?;

    surface.clear([0, 0, 0, 255]);
    surface.composite(&layer, 1.0, BlendMode::Normal)?;

    let (w, h) = (canvas.width, canvas.height);
    blur_in_place(surface.data_mut(), w, h, cfg.blur_radius);

    let overlay = cfg
        .overlay_color
        .with_opacity(cfg.overlay_opacity)
        .to_rgba8_premul()
        .to_array();
    fill_over(surface.data_mut(), overlay);

    tracing::debug!(?fit, "background painted");
    Ok(fit)
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
