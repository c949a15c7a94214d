#![allow(clippy::float_cmp)]

use image::Rgba;

use super::*;
use crate::config::CanvasConfig;
use crate::scene::{BackgroundImage, OverlayAsset};

const EPSILON: f64 = 1e-9;

const PHOTO: Rgba<u8> = Rgba([30, 60, 90, 255]);
const GLASSES: Rgba<u8> = Rgba([250, 10, 10, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

// =============================================================
// Helpers
// =============================================================

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Channel-wise comparison with one step of slack for blend rounding.
fn assert_px(frame: &Frame, x: u32, y: u32, expected: Rgba<u8>) {
    let got = frame.get_pixel(x, y);
    let close = got.0.iter().zip(expected.0.iter()).all(|(a, b)| a.abs_diff(*b) <= 1);
    assert!(close, "pixel ({x}, {y}) = {got:?}, expected {expected:?}");
}

fn surface() -> Surface {
    Surface::new(1080, 720)
}

fn empty_scene() -> Scene {
    Scene::new(&CanvasConfig::default())
}

fn with_background(w: u32, h: u32) -> Scene {
    let mut scene = empty_scene();
    scene.background = Some(BackgroundImage::fit(&RgbaImage::from_pixel(w, h, PHOTO), scene.surface));
    scene
}

fn composed() -> Scene {
    let mut scene = with_background(2000, 1000);
    scene.asset = OverlayAsset::new("/glasses/glasses1.png".into(), RgbaImage::from_pixel(300, 100, GLASSES));
    scene.transform = OverlayTransform { x: 400.0, y: 150.0, width: 280.0, height: 280.0 / 3.0 };
    scene
}

// =============================================================
// place_background
// =============================================================

#[test]
fn place_wide_image_letterboxes_vertically() {
    let p = place_background(surface(), 2000, 1000);
    assert!(approx_eq(p.scale, 0.54));
    assert!(approx_eq(p.width, 1080.0));
    assert!(approx_eq(p.height, 540.0));
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 90.0));
}

#[test]
fn place_tall_image_letterboxes_horizontally() {
    let p = place_background(surface(), 500, 1000);
    assert!(approx_eq(p.scale, 0.72));
    assert!(approx_eq(p.width, 360.0));
    assert!(approx_eq(p.height, 720.0));
    assert!(approx_eq(p.x, 360.0));
    assert!(approx_eq(p.y, 0.0));
}

#[test]
fn place_small_image_scales_up() {
    let p = place_background(surface(), 108, 72);
    assert!(approx_eq(p.scale, 10.0));
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 0.0));
}

#[test]
fn place_limiting_side_fills_surface() {
    for (w, h) in [(4000, 3000), (640, 480), (1, 1000), (1000, 1), (1080, 720)] {
        let p = place_background(surface(), w, h);
        let fills_width = approx_eq(p.width, 1080.0) && p.height <= 720.0 + EPSILON;
        let fills_height = approx_eq(p.height, 720.0) && p.width <= 1080.0 + EPSILON;
        assert!(fills_width || fills_height, "{w}x{h} -> {p:?}");
        assert!(approx_eq(p.x, (1080.0 - p.width) / 2.0));
        assert!(approx_eq(p.y, (720.0 - p.height) / 2.0));
    }
}

// =============================================================
// scale_layer
// =============================================================

#[test]
fn scale_layer_rounds_to_whole_pixels() {
    let src = RgbaImage::from_pixel(300, 100, GLASSES);
    let out = scale_layer(&src, 280.0, 93.33);
    assert_eq!(out.dimensions(), (280, 93));
}

#[test]
fn scale_layer_never_collapses_to_zero() {
    let src = RgbaImage::from_pixel(10, 10, GLASSES);
    let out = scale_layer(&src, 0.2, 0.2);
    assert_eq!(out.dimensions(), (1, 1));
}

#[test]
fn scale_layer_same_size_is_copy() {
    let src = RgbaImage::from_pixel(4, 3, GLASSES);
    assert_eq!(scale_layer(&src, 4.0, 3.0), src);
}

// =============================================================
// render
// =============================================================

#[test]
fn render_frame_has_surface_size() {
    assert_eq!(render(&empty_scene()).dimensions(), (1080, 720));
}

#[test]
fn render_empty_scene_is_blank() {
    let frame = render(&empty_scene());
    assert!(frame.pixels().all(|p| *p == CLEAR));
}

#[test]
fn render_background_is_centered() {
    let frame = render(&with_background(2000, 1000));
    // Letterbox bands above and below the 540px-tall photo.
    assert_px(&frame, 540, 0, CLEAR);
    assert_px(&frame, 540, 89, CLEAR);
    assert_px(&frame, 540, 90, PHOTO);
    assert_px(&frame, 540, 629, PHOTO);
    assert_px(&frame, 540, 630, CLEAR);
}

#[test]
fn render_asset_without_background_is_blank() {
    let mut scene = empty_scene();
    scene.asset = OverlayAsset::new("a".into(), RgbaImage::from_pixel(2, 1, GLASSES));
    let frame = render(&scene);
    assert!(frame.pixels().all(|p| *p == CLEAR));
}

#[test]
fn render_overlay_on_top_of_background() {
    let frame = render(&composed());
    assert_px(&frame, 500, 200, GLASSES);
    assert_px(&frame, 300, 200, PHOTO);
    assert_px(&frame, 500, 300, PHOTO);
}

#[test]
fn render_is_idempotent() {
    let scene = composed();
    assert_eq!(render(&scene), render(&scene));
}

#[test]
fn render_moved_overlay_leaves_no_trail() {
    let mut scene = composed();
    let before = render(&scene);
    scene.transform = scene.transform.moved_to(10.0, 100.0);
    let after = render(&scene);
    assert_px(&before, 500, 200, GLASSES);
    assert_px(&after, 500, 200, PHOTO);
    assert_px(&after, 20, 120, GLASSES);
}

#[test]
fn render_overlay_partly_off_surface_is_clipped() {
    let mut scene = composed();
    scene.transform = scene.transform.moved_to(-100.0, -20.0);
    let frame = render(&scene);
    assert_eq!(frame.dimensions(), (1080, 720));
    // Top-left of the surface is inside the overlay, above the photo.
    assert_px(&frame, 0, 0, GLASSES);
}

#[test]
fn render_overlay_fully_off_surface_draws_background_only() {
    let mut scene = composed();
    scene.transform = scene.transform.moved_to(5000.0, 5000.0);
    assert_eq!(render(&scene), render(&with_background(2000, 1000)));
}

#[test]
fn render_transparent_overlay_pixels_show_background() {
    let mut scene = composed();
    scene.asset = OverlayAsset::new("clear".into(), RgbaImage::from_pixel(300, 100, CLEAR));
    let frame = render(&scene);
    assert_px(&frame, 500, 200, PHOTO);
}

// =============================================================
// Enlarged overlays / layer cache
// =============================================================

const LEFT: Rgba<u8> = Rgba([200, 0, 0, 255]);
const RIGHT: Rgba<u8> = Rgba([0, 0, 200, 255]);
const LOWER: Rgba<u8> = Rgba([0, 200, 0, 255]);

/// 300×100 asset: upper-left, upper-right and lower halves in distinct colors.
fn split_asset() -> Option<OverlayAsset> {
    let pixels = RgbaImage::from_fn(300, 100, |x, y| match (x, y) {
        (_, 50..) => LOWER,
        (..150, _) => LEFT,
        _ => RIGHT,
    });
    OverlayAsset::new("split".into(), pixels)
}

fn cached_size(scene: &Scene) -> Option<(u32, u32)> {
    scene.asset.as_ref().and_then(|a| a.layers().layer_size())
}

fn resamples(scene: &Scene) -> Option<u32> {
    scene.asset.as_ref().map(|a| a.layers().resamples())
}

#[test]
fn render_huge_overlay_materializes_only_visible_part() {
    let mut scene = composed();
    scene.transform = OverlayTransform { x: 400.0, y: 150.0, width: 35_000.0, height: 35_000.0 / 3.0 };
    let frame = render(&scene);
    // The layer covers the surface from (400, 150) to the far corner, nothing more.
    assert_eq!(cached_size(&scene), Some((680, 570)));
    assert_px(&frame, 399, 300, PHOTO);
    assert_px(&frame, 500, 149, PHOTO);
    assert_px(&frame, 400, 150, GLASSES);
    assert_px(&frame, 1079, 719, GLASSES);
}

#[test]
fn render_huge_overlay_keeps_aspect() {
    let mut scene = with_background(2000, 1000);
    scene.asset = split_asset();
    // 30000×10000 centered so the asset's midlines land at x = 100 and y = 100.
    scene.transform = OverlayTransform { x: -14_900.0, y: -4_900.0, width: 30_000.0, height: 10_000.0 };
    let frame = render(&scene);
    assert_eq!(cached_size(&scene), Some((1080, 720)));
    assert_px(&frame, 20, 20, LEFT);
    assert_px(&frame, 180, 20, RIGHT);
    assert_px(&frame, 20, 180, LOWER);
    assert_px(&frame, 1000, 700, LOWER);
}

#[test]
fn render_large_overlay_is_not_squashed() {
    let mut scene = with_background(2000, 1000);
    scene.asset = split_asset();
    scene.transform = OverlayTransform { x: -500.0, y: 0.0, width: 2_400.0, height: 800.0 };
    let frame = render(&scene);
    // Whole layer at the transform size; the blit clips it to the surface.
    assert_eq!(cached_size(&scene), Some((2400, 800)));
    assert_px(&frame, 600, 300, LEFT);
    assert_px(&frame, 800, 300, RIGHT);
    assert_px(&frame, 600, 500, LOWER);
}

#[test]
fn render_drag_reuses_resampled_layer() {
    let mut scene = composed();
    let _ = render(&scene);
    scene.transform = scene.transform.moved_to(20.0, 30.0);
    let frame = render(&scene);
    assert_eq!(resamples(&scene), Some(1));
    assert_px(&frame, 30, 40, GLASSES);

    scene.transform = scene.transform.resized(300.0, scene.aspect(), 20.0);
    let _ = render(&scene);
    assert_eq!(resamples(&scene), Some(2));
    assert_eq!(cached_size(&scene), Some((300, 100)));
}

#[test]
fn render_huge_overlay_drag_reuses_window() {
    let mut scene = composed();
    scene.transform = OverlayTransform { x: -20_000.0, y: -8_000.0, width: 35_000.0, height: 35_000.0 / 3.0 };
    let _ = render(&scene);
    scene.transform = scene.transform.moved_to(-20_010.0, -8_000.0);
    let _ = render(&scene);
    // The visible window moved inside the layer, so it is sampled again.
    assert_eq!(resamples(&scene), Some(2));
    let _ = render(&scene);
    assert_eq!(resamples(&scene), Some(2));
}
