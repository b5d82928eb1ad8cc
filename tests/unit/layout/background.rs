use super::*;

fn canvas() -> Canvas {
    Canvas::new(1920, 1080).unwrap()
}

#[test]
fn wider_source_fills_height_and_crops_sides() {
    let fit = cover_fit(3000, 1000, canvas());
    assert_eq!(fit.height, 1080.0);
    assert_eq!(fit.width, 3240.0);
    assert_eq!(fit.y, 0.0);
    assert_eq!(fit.x, -660.0);
}

#[test]
fn taller_source_fills_width_and_crops_top_bottom() {
    let fit = cover_fit(800, 600, canvas());
    assert_eq!(fit.width, 1920.0);
    assert_eq!(fit.height, 1440.0);
    assert_eq!(fit.x, 0.0);
    assert_eq!(fit.y, -180.0);
}

#[test]
fn equal_aspect_is_exact_on_both_branches() {
    for (w, h) in [(1920u32, 1080u32), (16, 9), (3840, 2160), (1280, 720)] {
        let a = cover_fit(w, h, canvas());
        let b = fit_to_height(w, h, canvas());
        assert_eq!(a, b, "{w}x{h}");
        assert_eq!(a.rect(), canvas().rect());
    }
}

#[test]
fn always_covers_canvas() {
    let c = canvas();
    for w in [1u32, 7, 640, 1919, 1920, 1921, 5000] {
        for h in [1u32, 3, 480, 1079, 1080, 1081, 4000] {
            let fit = cover_fit(w, h, c);
            assert!(fit.width >= c.w() - 1e-9, "{w}x{h} -> {fit:?}");
            assert!(fit.height >= c.h() - 1e-9, "{w}x{h} -> {fit:?}");
            assert!(fit.x <= 0.0 && fit.y <= 0.0);
            assert!(((fit.x + fit.width / 2.0) - c.w() / 2.0).abs() < 1e-6);
            assert!(((fit.y + fit.height / 2.0) - c.h() / 2.0).abs() < 1e-6);
        }
    }
}

#[test]
fn scale_is_uniform() {
    let fit = cover_fit(800, 600, canvas());
    let s = fit.scale_for(800);
    assert!((fit.height - 600.0 * s).abs() < 1e-9);
}
