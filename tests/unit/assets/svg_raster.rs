use super::*;

fn tree(svg: &[u8]) -> usvg::Tree {
    usvg::Tree::from_data(svg, &usvg::Options::default()).unwrap()
}

#[test]
fn long_side_is_scaled_to_target() {
    let t = tree(br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="40"></svg>"#);
    assert_eq!(svg_raster_size(&t, 320).unwrap(), (80, 320));
}

#[test]
fn square_svg_fills_target() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="#0000ff"/></svg>"##;
    let img = rasterize_svg(svg, 16).unwrap();
    assert_eq!((img.width, img.height), (16, 16));
    let center = ((8 * 16 + 8) * 4) as usize;
    assert_eq!(&img.rgba8_premul[center..center + 4], &[0, 0, 255, 255]);
}

#[test]
fn malformed_svg_is_a_decode_error() {
    let err = rasterize_svg(b"<svg", 16).unwrap_err();
    assert!(matches!(err, ThumbError::ImageDecode(_)));
}
