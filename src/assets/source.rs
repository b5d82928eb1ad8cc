use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::{
    assets::decode::{DecodedImage, decode_image},
    foundation::error::{ThumbError, ThumbResult},
};

/// Where an input image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file.
    Path(PathBuf),
    /// `data:<mime>;base64,<payload>` URL.
    DataUrl(String),
    /// Encoded bytes already in memory.
    Bytes(Vec<u8>),
    /// Already-decoded raster; skips decoding.
    Decoded(DecodedImage),
}

impl ImageSource {
    /// Interpret a user-supplied string as a source.
    ///
    /// Remote `http(s)` URLs are rejected; fetching them is the caller's job.
    pub fn parse(s: &str) -> ThumbResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ThumbError::unsupported_source("empty image source"));
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("data:") {
            return Ok(Self::DataUrl(trimmed.to_string()));
        }
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Err(ThumbError::unsupported_source(format!(
                "remote sources are not fetched: {trimmed}"
            )));
        }
        Ok(Self::Path(PathBuf::from(trimmed)))
    }

    /// Short description for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::DataUrl(url) => {
                let head = url.split(',').next().unwrap_or("data:");
                format!("{head},...")
            }
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
            Self::Decoded(img) => format!("<decoded {}x{}>", img.width, img.height),
        }
    }

    /// Resolve and decode this source.
    pub fn decode(&self) -> ThumbResult<DecodedImage> {
        match self {
            Self::Path(p) => decode_image(&read_file(p)?),
            Self::DataUrl(url) => decode_image(&data_url_bytes(url)?),
            Self::Bytes(b) => decode_image(b),
            Self::Decoded(img) => Ok(img.clone()),
        }
    }
}

impl From<DecodedImage> for ImageSource {
    fn from(img: DecodedImage) -> Self {
        Self::Decoded(img)
    }
}

fn read_file(path: &Path) -> ThumbResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| ThumbError::image_decode(format!("read image '{}': {e}", path.display())))
}

/// Extract the payload of a `data:` URL (base64 or percent-free plain text).
pub fn data_url_bytes(url: &str) -> ThumbResult<Vec<u8>> {
    let rest = url
        .get(..5)
        .filter(|p| p.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| ThumbError::unsupported_source("not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ThumbError::unsupported_source("data URL has no ',' separator"))?;

    if meta
        .split(';')
        .any(|part| part.trim().eq_ignore_ascii_case("base64"))
    {
        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|e| ThumbError::unsupported_source(format!("invalid base64 payload: {e}")))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
