#![allow(clippy::float_cmp)]

use image::Rgba;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn solid(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]))
}

fn transform() -> OverlayTransform {
    OverlayTransform { x: 400.0, y: 150.0, width: 280.0, height: 140.0 }
}

// =============================================================
// AspectRatio
// =============================================================

#[test]
fn aspect_from_size() {
    let a = AspectRatio::from_size(300, 100).unwrap();
    assert_eq!(a.value(), 3.0);
}

#[test]
fn aspect_zero_side_is_none() {
    assert!(AspectRatio::from_size(0, 10).is_none());
    assert!(AspectRatio::from_size(10, 0).is_none());
}

#[test]
fn aspect_height_for_width() {
    let a = AspectRatio::from_size(300, 100).unwrap();
    assert!((a.height_for(280.0) - 93.333_333).abs() < 1e-3);
}

// =============================================================
// OverlayTransform
// =============================================================

#[test]
fn transform_rect_round_trips() {
    let rect = Rect::new(1.0, 2.0, 30.0, 40.0);
    assert_eq!(OverlayTransform::from_rect(rect).rect(), rect);
}

#[test]
fn moved_to_keeps_size() {
    let t = transform().moved_to(10.0, 20.0);
    assert_eq!((t.x, t.y, t.width, t.height), (10.0, 20.0, 280.0, 140.0));
}

#[test]
fn resized_follows_aspect() {
    let a = AspectRatio::from_size(4, 1);
    let t = transform().resized(400.0, a, 20.0);
    assert_eq!(t.width, 400.0);
    assert!(approx_eq(t.height, 100.0));
}

#[test]
fn resized_floors_width() {
    let t = transform().resized(-5.0, AspectRatio::from_size(2, 1), 20.0);
    assert_eq!(t.width, 20.0);
    assert_eq!(t.height, 10.0);
}

#[test]
fn resized_ignores_infinite_width() {
    let t = transform().resized(f64::INFINITY, AspectRatio::from_size(2, 1), 20.0);
    assert_eq!(t, transform());
}

#[test]
fn resized_keeps_corner() {
    let t = transform().resized(500.0, None, 20.0);
    assert_eq!((t.x, t.y), (400.0, 150.0));
}

// =============================================================
// BackgroundImage
// =============================================================

#[test]
fn background_fit_records_intrinsic_size() {
    let bg = BackgroundImage::fit(&solid(2000, 1000), Surface::new(1080, 720));
    assert_eq!(bg.size(), (2000, 1000));
}

#[test]
fn background_fit_scales_layer_to_placement() {
    let bg = BackgroundImage::fit(&solid(2000, 1000), Surface::new(1080, 720));
    assert_eq!(bg.layer().dimensions(), (1080, 540));
    assert!(approx_eq(bg.placement().y, 90.0));
}

// =============================================================
// OverlayAsset
// =============================================================

#[test]
fn asset_caches_aspect() {
    let asset = OverlayAsset::new("/glasses/glasses1.png".into(), solid(300, 100)).unwrap();
    assert_eq!(asset.aspect().value(), 3.0);
    assert_eq!(asset.size(), (300, 100));
    assert_eq!(asset.url(), "/glasses/glasses1.png");
}

#[test]
fn asset_zero_area_is_none() {
    assert!(OverlayAsset::new("x".into(), RgbaImage::new(0, 5)).is_none());
}

// =============================================================
// Scene / Stage
// =============================================================

#[test]
fn new_scene_is_empty_with_initial_transform() {
    let scene = Scene::new(&CanvasConfig::default());
    assert_eq!(scene.stage(), Stage::Empty);
    assert_eq!(scene.transform, transform());
    assert!(scene.aspect().is_none());
}

#[test]
fn stage_background_only() {
    let mut scene = Scene::new(&CanvasConfig::default());
    scene.background = Some(BackgroundImage::fit(&solid(10, 10), scene.surface));
    assert_eq!(scene.stage(), Stage::BackgroundOnly);
}

#[test]
fn stage_composed() {
    let mut scene = Scene::new(&CanvasConfig::default());
    scene.background = Some(BackgroundImage::fit(&solid(10, 10), scene.surface));
    scene.asset = OverlayAsset::new("a".into(), solid(2, 1));
    assert_eq!(scene.stage(), Stage::Composed);
    assert_eq!(scene.aspect().map(AspectRatio::value), Some(2.0));
}

#[test]
fn stage_asset_without_background_is_empty() {
    let mut scene = Scene::new(&CanvasConfig::default());
    scene.asset = OverlayAsset::new("a".into(), solid(2, 1));
    assert_eq!(scene.stage(), Stage::Empty);
}
