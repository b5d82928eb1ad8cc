use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use sha2::Digest as _;
use usvg::fontdb;

use crate::{
    config::model::FontConfig,
    foundation::error::{ThumbError, ThumbResult},
};

/// Font bytes plus the identity of the face used for the title.
#[derive(Clone)]
pub struct FontFace {
    /// Raw font file bytes (`.ttf`, `.otf` or `.ttc`).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Primary family name reported by the face.
    pub family: String,
    /// OpenType weight of the face (400 regular, 700 bold).
    pub weight: u16,
    /// Whether the face is italic or oblique.
    pub italic: bool,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("weight", &self.weight)
            .field("italic", &self.italic)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// Load the first face of a font file.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes)
            .map_err(|e| ThumbError::font(format!("{}: {e}", path.display())))
    }

    /// Use in-memory font bytes, reading the family name from the first face.
    pub fn from_bytes(bytes: Vec<u8>) -> ThumbResult<Self> {
        let bytes = Arc::new(bytes);
        let mut db = fontdb::Database::new();
        db.load_font_source(fontdb::Source::Binary(bytes.clone()));
        let face = db
            .faces()
            .next()
            .ok_or_else(|| ThumbError::font("data contains no usable font face"))?;
        Ok(Self {
            family: primary_family(face),
            index: face.index,
            weight: face.weight.0,
            italic: is_italic(face),
            bytes,
        })
    }

    /// Resolve the title face: the explicit path if configured, otherwise the first
    /// configured family found in the system and extra font directories (bold italic
    /// preferred), then any sans-serif face.
    #[tracing::instrument(skip(cfg))]
    pub fn resolve(cfg: &FontConfig) -> ThumbResult<Self> {
        if let Some(path) = &cfg.path {
            let face = Self::from_path(path)?;
            tracing::debug!(family = %face.family, path = %path.display(), "using explicit font");
            return Ok(face);
        }

        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        for dir in &cfg.font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        Self::select(&db, &cfg.families)
    }

    /// Pick the best match for `families` in an already-populated database.
    pub fn select(db: &fontdb::Database, families: &[String]) -> ThumbResult<Self> {
        let mut query_families: Vec<fontdb::Family<'_>> = families
            .iter()
            .map(|name| fontdb::Family::Name(name.as_str()))
            .collect();
        query_families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &query_families,
            weight: fontdb::Weight::BOLD,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Italic,
        };

        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| {
                ThumbError::font(format!(
                    "no font face found for families {families:?} (and no fallback face)"
                ))
            })?;
        Self::from_database(db, id)
    }

    /// Load face `id` from `db`, keeping its collection index, weight and style.
    pub fn from_database(db: &fontdb::Database, id: fontdb::ID) -> ThumbResult<Self> {
        let info = db
            .face(id)
            .ok_or_else(|| ThumbError::font("font face is not in the database"))?;
        let family = primary_family(info);
        let (weight, italic) = (info.weight.0, is_italic(info));
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| ThumbError::font(format!("font data for '{family}' is unreadable")))?;

        tracing::debug!(%family, index, weight, italic, "resolved title font");
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            family,
            weight,
            italic,
        })
    }

    /// Hex SHA-256 of the font bytes, used to identify the exact file that was used.
    pub fn sha256_hex(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }
}

fn is_italic(face: &fontdb::FaceInfo) -> bool {
    !matches!(face.style, fontdb::Style::Normal)
}

fn primary_family(face: &fontdb::FaceInfo) -> String {
    face.families
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| face.post_script_name.clone())
}

/// Load every `.ttf`/`.otf`/`.ttc` file directly inside `dir`; unreadable entries are skipped.
pub fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
