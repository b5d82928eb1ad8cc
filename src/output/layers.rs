use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;

use crate::{
    assets::decode::DecodedImage,
    config::model::{OutputFormat, TextEffects, ThumbnailConfig},
    engine::compositor::Generation,
    foundation::error::ThumbResult,
    layout::icons::IconRow,
    output::encode::write_frame,
    render::surface::FrameRGBA,
};

/// Contents of `02_title.json`.
#[derive(Debug, Serialize)]
pub struct TitleLayer<'a> {
    /// Title as requested.
    pub title: &'a str,
    /// Chosen font size in pixels.
    pub font_size: f64,
    /// Lines as painted.
    pub lines: &'a [String],
    /// Whether the last line was truncated.
    pub truncated: bool,
    /// Glyph fill as `#RRGGBBAA`.
    pub fill: String,
    /// Face family, when a font was resolved.
    pub family: Option<&'a str>,
    /// Shadow parameters used.
    pub effects: &'a TextEffects,
    /// Icon row geometry, if any.
    pub icons: Option<&'a IconRow>,
}

/// Write the generation as separate layer files into `dir`.
///
/// Produces `01_background.png` (blurred background with overlay), `02_title.json` and one
/// `03_icon_NN.png` per painted icon. Returns the written paths in that order.
#[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn export_layers(
    dir: impl AsRef<Path>,
    generation: &Generation,
    title: &str,
    family: Option<&str>,
    icons: &[DecodedImage],
    config: &ThumbnailConfig,
) -> ThumbResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).with_context(|| format!("create '{}'", dir.display()))?;

    let mut written = Vec::new();

    let background = dir.join("01_background.png");
    write_frame(&background, &generation.background, OutputFormat::Png, 1.0)?;
    written.push(background);

    let meta = TitleLayer {
        title,
        font_size: generation.title.font_size,
        lines: &generation.title.lines,
        truncated: generation.title.truncated,
        fill: config.font.fill.to_hex(),
        family,
        effects: &config.effects.text,
        icons: generation.icons.as_ref(),
    };
    let json = serde_json::to_string_pretty(&meta).context("serialize title layer")?;
    let title_path = dir.join("02_title.json");
    std::fs::write(&title_path, json)
        .with_context(|| format!("write '{}'", title_path.display()))?;
    written.push(title_path);

    let painted = generation.icons.as_ref().map_or(0, |row| row.slots.len());
    for (i, icon) in icons.iter().take(painted).enumerate() {
        let path = dir.join(format!("03_icon_{:02}.png", i + 1));
        write_frame(&path, &icon_frame(icon), OutputFormat::Png, 1.0)?;
        written.push(path);
    }

    tracing::debug!(files = written.len(), "layers exported");
    Ok(written)
}

fn icon_frame(icon: &DecodedImage) -> FrameRGBA {
    FrameRGBA {
        width: icon.width,
        height: icon.height,
        data: icon.rgba8_premul.as_ref().clone(),
        premultiplied: true,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/layers.rs"]
mod tests;
