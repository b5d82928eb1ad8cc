use crate::{
    config::color::Color,
    config::model::DropShadow,
    effects::blur::blur_in_place,
    foundation::error::ThumbResult,
    foundation::math::mul_div255_u8,
    render::surface::Layer,
};

/// Gaussian standard deviation for a canvas-style `shadowBlur` amount.
pub fn shadow_sigma(blur: f64) -> f64 {
    (blur / 2.0).max(0.0)
}

/// Replace every pixel's color with `color`, keeping coverage from the pixel's alpha.
pub fn tint_alpha(layer: &mut Layer, color: Color) {
    let c = color.to_rgba8_premul().to_array();
    for px in layer.data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for i in 0..4 {
            px[i] = mul_div255_u8(u16::from(c[i]), a);
        }
    }
}

/// Build the drop-shadow layer for `source`: its alpha tinted with the shadow color and
/// opacity, moved by `(distance, distance)` and blurred with `sigma = blur / 2`.
///
/// Returns `None` when the source has no visible pixels.
pub fn drop_shadow_layer(source: &Layer, shadow: &DropShadow) -> ThumbResult<Option<Layer>> {
    let Some((x0, y0, x1, y1)) = source.alpha_bounds() else {
        return Ok(None);
    };
    let sigma = shadow_sigma(shadow.blur);
    let pad = (sigma * 3.0).ceil() as u32 + 1;

    let mut layer = source.crop(x0, y0, x1, y1).padded(pad);
    tint_alpha(&mut layer, shadow.color.with_opacity(shadow.opacity));
    blur_in_place(&mut layer.data, layer.width, layer.height, sigma);

    let offset = shadow.distance.round() as i32;
    layer.x += offset;
    layer.y += offset;
    Ok(Some(layer))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
