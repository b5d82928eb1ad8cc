use super::*;

fn frame(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 4,
        height: 2,
        data: px.repeat(8),
        premultiplied: true,
    }
}

#[test]
fn quality_maps_to_percent() {
    assert_eq!(jpeg_quality(0.9), 90);
    assert_eq!(jpeg_quality(1.0), 100);
    assert_eq!(jpeg_quality(0.0), 1);
    assert_eq!(jpeg_quality(3.0), 100);
}

#[test]
fn png_roundtrips_and_unpremultiplies() {
    let bytes = encode(&frame([64, 32, 0, 128]), OutputFormat::Png, 0.9).unwrap();
    assert_eq!(&bytes[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    let p = img.get_pixel(0, 0).0;
    assert_eq!(p[3], 128);
    assert!((i32::from(p[0]) - 128).abs() <= 1);
    assert!((i32::from(p[1]) - 64).abs() <= 1);
}

#[test]
fn jpeg_has_magic_and_dimensions() {
    let bytes = encode(&frame([10, 20, 30, 255]), OutputFormat::Jpeg, 0.9).unwrap();
    assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (4, 2));
}

#[test]
fn mismatched_frame_is_an_encode_error() {
    let bad = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 3],
        premultiplied: false,
    };
    assert!(matches!(
        encode(&bad, OutputFormat::Png, 0.9).unwrap_err(),
        ThumbError::Encode(_)
    ));
}
