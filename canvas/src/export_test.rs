use image::{Rgba, RgbaImage};

use super::*;

#[test]
fn encode_png_has_png_signature() {
    let frame = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn encode_png_preserves_pixels() {
    let mut frame = RgbaImage::new(3, 2);
    frame.put_pixel(2, 1, Rgba([9, 8, 7, 128]));
    let bytes = encode_png(&frame).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back, frame);
}

#[test]
fn not_composed_names_stage() {
    let err = ExportError::NotComposed { stage: Stage::BackgroundOnly };
    assert!(err.to_string().contains("BackgroundOnly"));
}
