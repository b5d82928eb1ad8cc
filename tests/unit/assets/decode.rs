use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let bytes = png_bytes(3, 2, [100, 50, 200, 128]);
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.rgba8_premul.len(), 3 * 2 * 4);
    assert_eq!(
        &img.rgba8_premul[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_jpeg_is_opaque() {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 200, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    let decoded = decode_image(&buf).unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 4));
    assert!(decoded.rgba8_premul.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn unrecognized_bytes_are_a_decode_error() {
    let err = decode_image(b"\x00\x01corrupt garbage").unwrap_err();
    assert!(matches!(err, ThumbError::ImageDecode(_)), "{err}");
    assert!(err.to_string().contains("unrecognized image format"));
}

#[test]
fn truncated_png_is_a_decode_error() {
    let bytes = png_bytes(8, 8, [1, 2, 3, 255]);
    let err = decode_image(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, ThumbError::ImageDecode(_)), "{err}");
}

#[test]
fn empty_input_is_a_decode_error() {
    assert!(matches!(
        decode_image(&[]).unwrap_err(),
        ThumbError::ImageDecode(_)
    ));
}

#[test]
fn svg_is_sniffed_by_content() {
    assert!(looks_like_svg(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"));
    assert!(looks_like_svg(
        b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>"
    ));
    assert!(!looks_like_svg(&png_bytes(1, 1, [0, 0, 0, 255])));
}

#[test]
fn svg_decodes_at_icon_resolution() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#ff0000"/></svg>"##;
    let img = decode_image(svg).unwrap();
    assert_eq!((img.width, img.height), (SVG_RASTER_LONG_SIDE, SVG_RASTER_LONG_SIDE / 2));
}

#[test]
fn buffer_length_is_checked() {
    assert!(DecodedImage::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(DecodedImage::from_straight_rgba8(0, 2, vec![]).is_err());
}
