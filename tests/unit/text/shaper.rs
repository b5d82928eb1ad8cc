use super::*;
use crate::config::model::FontConfig;
use usvg::fontdb;

fn system_shaper() -> Option<TextShaper> {
    match FontFace::resolve(&FontConfig::default()) {
        Ok(face) => Some(TextShaper::new(face).unwrap()),
        Err(e) => {
            eprintln!("no usable font ({e}); skipping");
            None
        }
    }
}

#[test]
fn invalid_size_is_rejected() {
    let Some(mut shaper) = system_shaper() else {
        return;
    };
    assert!(shaper.shape_line("Hi", 0.0).is_err());
    assert!(shaper.shape_line("Hi", f32::NAN).is_err());
}

#[test]
fn empty_text_measures_zero() {
    let Some(mut shaper) = system_shaper() else {
        return;
    };
    let line = shaper.shape_line("", 32.0).unwrap();
    assert!(line.glyphs.is_empty());
    assert_eq!(line.width, 0.0);
}

#[test]
fn width_grows_with_text_and_size() {
    let Some(mut shaper) = system_shaper() else {
        return;
    };
    let short = shaper.measure("Rust", 64.0);
    let long = shaper.measure("Rust Rust", 64.0);
    let big = shaper.measure("Rust", 128.0);
    assert!(short > 0.0);
    assert!(long > short);
    assert!((big / short - 2.0).abs() < 0.1, "short={short} big={big}");
}

#[test]
fn glyphs_sit_on_the_baseline() {
    let Some(mut shaper) = system_shaper() else {
        return;
    };
    let line = shaper.shape_line("Hello", 48.0).unwrap();
    assert_eq!(line.glyphs.len(), 5);
    assert!(line.ascent > 0.0);
    assert!(line.descent >= 0.0);
    for g in &line.glyphs {
        assert!(g.y.abs() < 1e-3);
        assert!(f64::from(g.x) <= line.width);
    }
}

fn file_of(face: &fontdb::FaceInfo) -> Option<std::path::PathBuf> {
    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => Some(path.clone()),
        _ => None,
    }
}

#[test]
fn shaping_uses_the_selected_face_of_a_collection() {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    // Only faces whose family is unique within their collection file identify a single index.
    let family_of = |f: &fontdb::FaceInfo| f.families.first().map(|(n, _)| n.clone());
    let unique = |f: &fontdb::FaceInfo| {
        db.faces()
            .filter(|o| file_of(o) == file_of(f) && family_of(o) == family_of(f))
            .count()
            == 1
    };
    let Some(id) = db
        .faces()
        .find(|f| f.index > 0 && file_of(f).is_some() && unique(f))
        .map(|f| f.id)
    else {
        eprintln!("no font collection installed; skipping");
        return;
    };
    let face = FontFace::from_database(&db, id).unwrap();
    let index = face.index;
    let mut shaper = TextShaper::new(face).unwrap();
    let line = shaper.shape_line("Hello", 48.0).unwrap();
    if line.glyphs.is_empty() {
        return;
    }
    assert_eq!(line.font_index, Some(index));
}

#[test]
fn shaper_carries_weight_and_style_of_the_selected_face() {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let single_face_file = |f: &fontdb::FaceInfo| {
        file_of(f).is_some() && db.faces().filter(|o| file_of(o) == file_of(f)).count() == 1
    };
    let Some(id) = db
        .faces()
        .find(|f| {
            f.weight.0 >= 700 && !matches!(f.style, fontdb::Style::Normal) && single_face_file(f)
        })
        .map(|f| f.id)
    else {
        eprintln!("no bold italic face installed; skipping");
        return;
    };
    let face = FontFace::from_database(&db, id).unwrap();
    assert!(face.weight >= 700);
    assert!(face.italic);
    let index = face.index;
    let mut shaper = TextShaper::new(face).unwrap();
    let line = shaper.shape_line("Hi", 32.0).unwrap();
    assert_eq!(line.font_index, Some(index));
}
