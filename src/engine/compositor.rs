use crate::{
    assets::{
        decode::DecodedImage,
        loader::{DecodedInputs, decode_inputs},
        source::ImageSource,
    },
    config::model::ThumbnailConfig,
    foundation::error::{ThumbError, ThumbResult},
    layout::{
        background::CoverFit,
        icons::IconRow,
        typography::{TextLayout, TypographyParams, fit_title},
    },
    render::{
        background::paint_background,
        icons::paint_icons,
        surface::{FrameRGBA, Surface},
        title::paint_title,
    },
    text::{font::FontFace, shaper::TextShaper},
};

/// Everything one `generate` call produced.
#[derive(Clone, Debug)]
pub struct Generation {
    /// Final composited frame (premultiplied).
    pub frame: FrameRGBA,
    /// Surface contents right after the background stage.
    pub background: FrameRGBA,
    /// Background placement.
    pub cover: CoverFit,
    /// Chosen title size and lines.
    pub title: TextLayout,
    /// Icon row geometry, if any icon was painted.
    pub icons: Option<IconRow>,
}

/// Thumbnail compositor owning one surface and its configuration.
///
/// `generate` takes `&mut self`, so one engine never runs overlapping generations; use one
/// engine per concurrent request.
#[derive(Debug)]
pub struct CompositingEngine {
    config: ThumbnailConfig,
    surface: Surface,
    shaper: Option<TextShaper>,
}

impl CompositingEngine {
    /// Validate `config` and allocate the surface.
    pub fn new(config: ThumbnailConfig) -> ThumbResult<Self> {
        config.validate()?;
        let surface = Surface::new(config.canvas()?)?;
        Ok(Self {
            config,
            surface,
            shaper: None,
        })
    }

    /// Use `face` for titles instead of resolving one from the font configuration.
    pub fn with_font(mut self, face: FontFace) -> ThumbResult<Self> {
        self.shaper = Some(TextShaper::new(face)?);
        Ok(self)
    }

    /// Engine configuration.
    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Face used for titles, if one has been resolved yet.
    pub fn font(&self) -> Option<&FontFace> {
        self.shaper.as_ref().map(TextShaper::face)
    }

    /// Resolve the title font now rather than on the first titled generation.
    pub fn ensure_font(&mut self) -> ThumbResult<&FontFace> {
        Ok(self.shaper_mut()?.face())
    }

    fn shaper_mut(&mut self) -> ThumbResult<&mut TextShaper> {
        if self.shaper.is_none() {
            let face = FontFace::resolve(&self.config.font)?;
            self.shaper = Some(TextShaper::new(face)?);
        }
        self.shaper
            .as_mut()
            .ok_or_else(|| ThumbError::font("title font was not initialized"))
    }

    /// Decode the inputs, then composite background, title and icons.
    pub fn generate(
        &mut self,
        background: &ImageSource,
        title: &str,
        icons: &[ImageSource],
    ) -> ThumbResult<FrameRGBA> {
        Ok(self.generate_detailed(background, title, icons)?.frame)
    }

    /// [`generate`](Self::generate), also returning layout details and the background
    /// snapshot.
    #[tracing::instrument(skip(self, background, icons), fields(icons = icons.len()))]
    pub fn generate_detailed(
        &mut self,
        background: &ImageSource,
        title: &str,
        icons: &[ImageSource],
    ) -> ThumbResult<Generation> {
        let DecodedInputs { background, icons } = decode_inputs(background, icons)?;
        self.generate_decoded(&background, title, &icons)
    }

    /// Composite already-decoded inputs.
    ///
    /// Font resolution happens before the surface is touched, so a failed call leaves the
    /// previous frame intact.
    pub fn generate_decoded(
        &mut self,
        background: &DecodedImage,
        title: &str,
        icons: &[DecodedImage],
    ) -> ThumbResult<Generation> {
        let has_text = !title.trim().is_empty();
        if has_text {
            self.shaper_mut()?;
        }

        let cover = paint_background(&mut self.surface, background, &self.config.canvas)?;
        let background_frame = self.surface.snapshot();

        let params = TypographyParams::from_config(&self.config.font, self.surface.canvas());
        let layout = match self.shaper.as_mut() {
            Some(shaper) if has_text => {
                let layout = fit_title(title, &params, &mut *shaper);
                paint_title(
                    &mut self.surface,
                    shaper,
                    &layout,
                    &self.config.font,
                    &self.config.effects.text,
                )?;
                layout
            }
            _ => TextLayout {
                font_size: params.base_size,
                lines: Vec::new(),
                truncated: false,
            },
        };

        let row = paint_icons(
            &mut self.surface,
            icons,
            &self.config.icons,
            &self.config.effects.icons.drop_shadow,
            self.config.canvas.max_icons,
        )?;

        tracing::info!(
            font_size = layout.font_size,
            lines = layout.lines.len(),
            truncated = layout.truncated,
            icons = row.as_ref().map_or(0, |r| r.slots.len()),
            "thumbnail composited"
        );

        Ok(Generation {
            frame: self.surface.snapshot(),
            background: background_frame,
            cover,
            title: layout,
            icons: row,
        })
    }

    /// Current surface contents.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/compositor.rs"]
mod tests;
