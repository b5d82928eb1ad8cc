use base64::Engine as _;

use super::*;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 8, 7, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn parse_classifies_sources() {
    assert_eq!(
        ImageSource::parse("bg.png").unwrap(),
        ImageSource::Path(PathBuf::from("bg.png"))
    );
    assert!(matches!(
        ImageSource::parse("data:image/png;base64,AAAA").unwrap(),
        ImageSource::DataUrl(_)
    ));
    assert!(matches!(
        ImageSource::parse("https://example.com/a.png").unwrap_err(),
        ThumbError::UnsupportedSource(_)
    ));
    assert!(matches!(
        ImageSource::parse("HTTP://example.com/a.png").unwrap_err(),
        ThumbError::UnsupportedSource(_)
    ));
    assert!(ImageSource::parse("   ").is_err());
}

#[test]
fn base64_data_url_decodes() {
    let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes());
    let src = ImageSource::parse(&format!("data:image/png;base64,{encoded}")).unwrap();
    let img = src.decode().unwrap();
    assert_eq!((img.width, img.height), (2, 2));
    assert!(src.describe().starts_with("data:image/png;base64"));
}

#[test]
fn malformed_data_urls_are_unsupported() {
    assert!(matches!(
        data_url_bytes("data:image/png;base64").unwrap_err(),
        ThumbError::UnsupportedSource(_)
    ));
    assert!(matches!(
        data_url_bytes("data:image/png;base64,@@@").unwrap_err(),
        ThumbError::UnsupportedSource(_)
    ));
    assert_eq!(data_url_bytes("data:text/plain,hi").unwrap(), b"hi");
}

#[test]
fn missing_file_is_a_decode_error_naming_the_path() {
    let err = ImageSource::Path(PathBuf::from("/nonexistent/thumbforge/bg.png"))
        .decode()
        .unwrap_err();
    assert!(matches!(err, ThumbError::ImageDecode(_)), "{err}");
    assert!(err.to_string().contains("read image '/nonexistent/thumbforge/bg.png'"));
}

#[test]
fn decoded_source_passes_through() {
    let img = DecodedImage::from_premul_rgba8(1, 1, vec![1, 2, 3, 4]).unwrap();
    let src = ImageSource::from(img.clone());
    assert_eq!(src.decode().unwrap(), img);
    assert_eq!(ImageSource::Bytes(png_bytes()).decode().unwrap().width, 2);
}
