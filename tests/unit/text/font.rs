use super::*;

#[test]
fn garbage_bytes_are_a_font_error() {
    let err = FontFace::from_bytes(b"not a font".to_vec()).unwrap_err();
    assert!(matches!(err, ThumbError::Font(_)), "{err}");
}

#[test]
fn missing_font_file_carries_context() {
    let err = FontFace::from_path("/nonexistent/thumbforge/font.ttf").unwrap_err();
    assert!(format!("{err:#}").contains("read font file"));
}

#[test]
fn empty_database_has_no_face() {
    let db = fontdb::Database::new();
    let err = FontFace::select(&db, &["Liberation Sans".to_string()]).unwrap_err();
    assert!(matches!(err, ThumbError::Font(_)));
}

#[test]
fn unreadable_font_dir_is_skipped() {
    let mut db = fontdb::Database::new();
    load_fonts_from_dir(&mut db, Path::new("/nonexistent/thumbforge/fonts"));
    assert_eq!(db.len(), 0);
}

#[test]
fn digest_is_hex_sha256_of_bytes() {
    let face = FontFace {
        bytes: Arc::new(b"abc".to_vec()),
        index: 0,
        family: "Test".to_string(),
        weight: 400,
        italic: false,
    };
    assert_eq!(
        face.sha256_hex(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn system_resolution_returns_named_face_when_fonts_exist() {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    if db.is_empty() {
        eprintln!("no system fonts; skipping");
        return;
    }
    let face = FontFace::select(&db, &FontConfig::default().families).unwrap();
    assert!(!face.bytes.is_empty());
    assert!(!face.family.is_empty());
}
