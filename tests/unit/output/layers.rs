use super::*;
use crate::engine::compositor::CompositingEngine;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "thumbforge_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn small_config() -> ThumbnailConfig {
    let mut cfg = ThumbnailConfig::default();
    cfg.canvas.width = 320;
    cfg.canvas.height = 180;
    cfg.canvas.blur_radius = 2.0;
    cfg.canvas.max_icons = 2;
    cfg.effects.icons.drop_shadow.blur = 4.0;
    cfg
}

fn solid(w: u32, h: u32, px: [u8; 4]) -> DecodedImage {
    DecodedImage::from_premul_rgba8(w, h, px.repeat((w * h) as usize)).unwrap()
}

#[test]
fn writes_background_metadata_and_painted_icons() {
    let cfg = small_config();
    let mut engine = CompositingEngine::new(cfg.clone()).unwrap();
    let icons = vec![
        solid(8, 8, [255, 0, 0, 255]),
        solid(8, 8, [0, 255, 0, 255]),
        solid(8, 8, [0, 0, 255, 255]),
    ];
    let generation = engine
        .generate_decoded(&solid(40, 30, [30, 60, 90, 255]), "", &icons)
        .unwrap();

    let dir = temp_dir("layers");
    let files = export_layers(&dir, &generation, "", None, &icons, &cfg).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        ["01_background.png", "02_title.json", "03_icon_01.png", "03_icon_02.png"]
    );

    let bg = image::open(dir.join("01_background.png")).unwrap();
    assert_eq!((bg.width(), bg.height()), (320, 180));

    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("02_title.json")).unwrap())
            .unwrap();
    assert_eq!(meta["title"], "");
    assert_eq!(meta["fill"], "#ffffffff");
    assert_eq!(meta["lines"].as_array().unwrap().len(), 0);
    assert!(meta["family"].is_null());
    assert_eq!(meta["effects"]["drop_shadow"]["distance"], 9.0);
    assert!(meta["icons"]["size"].as_f64().unwrap() > 0.0);

    let icon = image::open(dir.join("03_icon_02.png")).unwrap().to_rgba8();
    assert_eq!(icon.get_pixel(0, 0).0, [0, 255, 0, 255]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn no_icons_means_no_icon_files() {
    let cfg = small_config();
    let mut engine = CompositingEngine::new(cfg.clone()).unwrap();
    let generation = engine
        .generate_decoded(&solid(4, 4, [0, 0, 0, 255]), " ", &[])
        .unwrap();

    let dir = temp_dir("layers_empty");
    let files = export_layers(&dir, &generation, " ", Some("Test Sans"), &[], &cfg).unwrap();
    assert_eq!(files.len(), 2);
    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&files[1]).unwrap()).unwrap();
    assert_eq!(meta["family"], "Test Sans");
    assert!(meta["icons"].is_null());
    std::fs::remove_dir_all(&dir).unwrap();
}
