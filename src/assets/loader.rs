use rayon::prelude::*;

use crate::{
    assets::{decode::DecodedImage, source::ImageSource},
    foundation::error::{ThumbError, ThumbResult},
};

/// Every input of one generation, decoded.
#[derive(Clone, Debug)]
pub struct DecodedInputs {
    /// Background raster.
    pub background: DecodedImage,
    /// Icon rasters in caller order.
    pub icons: Vec<DecodedImage>,
}

/// Decode the background and icons in parallel.
///
/// Returns only after every decode finished. The first failure in background, then icon,
/// order is reported.
#[tracing::instrument(skip(background, icons), fields(icons = icons.len()))]
pub fn decode_inputs(background: &ImageSource, icons: &[ImageSource]) -> ThumbResult<DecodedInputs> {
    let mut results: Vec<ThumbResult<DecodedImage>> = std::iter::once(background)
        .chain(icons.iter())
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|src| {
            let out = src.decode();
            if let Err(e) = &out {
                tracing::debug!(source = %src.describe(), error = %e, "decode failed");
            }
            out
        })
        .collect();

    let icons = results.split_off(1);
    let background = results
        .pop()
        .ok_or_else(|| ThumbError::render("missing background decode result"))??;
    let icons = icons.into_iter().collect::<ThumbResult<Vec<_>>>()?;
    Ok(DecodedInputs { background, icons })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
