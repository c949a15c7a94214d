//! Rendering: rebuilds the full frame from a [`Scene`].
//!
//! The drawing surface keeps no layers between frames, so every call starts
//! from a cleared (fully transparent) buffer, draws the background at its
//! fit-and-center placement, then the overlay at its transform rectangle.
//! Only the on-surface part of an oversized overlay is ever resampled, so frame
//! cost stays bounded by the surface size however far the overlay is enlarged.
//! [`render`] reads the scene and nothing else; equal scenes give equal pixels.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::cell::{Cell, RefCell};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::consts::MAX_LAYER_PIXELS;
use crate::geom::Surface;
use crate::scene::{OverlayAsset, OverlayTransform, Scene};

/// One rendered frame, `surface.width × surface.height` straight-alpha RGBA8.
pub type Frame = RgbaImage;

/// Where the background lands on the surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Uniform factor applied to the intrinsic image size.
    pub scale: f64,
}

/// Scale-to-fit, centered placement of an `img_w × img_h` image on `surface`.
///
/// `scale = min(W / img_w, H / img_h)`, so the limiting side exactly fills its
/// surface dimension and the other side is letterboxed evenly. Both image
/// sides must be non-zero.
#[must_use]
pub fn place_background(surface: Surface, img_w: u32, img_h: u32) -> Placement {
    let (sw, sh) = (f64::from(surface.width), f64::from(surface.height));
    let (iw, ih) = (f64::from(img_w), f64::from(img_h));
    let scale = (sw / iw).min(sh / ih);
    let width = iw * scale;
    let height = ih * scale;
    Placement {
        x: (sw - width) / 2.0,
        y: (sh - height) / 2.0,
        width,
        height,
        scale,
    }
}

/// Resample `pixels` to the given size, rounded to whole pixels.
#[must_use]
pub fn scale_layer(pixels: &RgbaImage, width: f64, height: f64) -> RgbaImage {
    resize_exact(pixels, pixel_extent(width), pixel_extent(height))
}

/// Draw `scene` into a fresh frame.
#[must_use]
pub fn render(scene: &Scene) -> Frame {
    let mut frame = RgbaImage::new(scene.surface.width, scene.surface.height);

    // Layer 1: background. Without it there is nothing to compose onto.
    let Some(background) = &scene.background else {
        return frame;
    };
    let p = background.placement();
    imageops::overlay(&mut frame, background.layer(), to_offset(p.x), to_offset(p.y));

    // Layer 2: overlay, only once its asset has decoded.
    if let Some(asset) = &scene.asset {
        draw_overlay(&mut frame, asset, scene.transform);
    }

    frame
}

// ── Overlay layer ───────────────────────────────────────────────

/// The overlay's rectangle snapped to whole surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelBox {
    left: i64,
    top: i64,
    width: i64,
    height: i64,
}

impl PixelBox {
    fn of(transform: OverlayTransform) -> Option<Self> {
        Some(Self {
            left: whole(transform.x)?,
            top: whole(transform.y)?,
            width: whole(transform.width)?.max(1),
            height: whole(transform.height)?.max(1),
        })
    }

    fn area(self) -> i64 {
        self.width.saturating_mul(self.height)
    }

    /// The part of the box that lands on a `frame_w × frame_h` frame, relative
    /// to the box's own top-left corner. `None` when nothing is on the frame.
    fn visible(self, frame_w: u32, frame_h: u32) -> Option<Window> {
        let x0 = self.left.max(0);
        let y0 = self.top.max(0);
        let x1 = self.left.saturating_add(self.width).min(i64::from(frame_w));
        let y1 = self.top.saturating_add(self.height).min(i64::from(frame_h));
        (x0 < x1 && y0 < y1).then(|| Window {
            x: x0 - self.left,
            y: y0 - self.top,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// Sub-rectangle of a [`PixelBox`], in box-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

/// What a cached overlay layer was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayerKey {
    size: (i64, i64),
    /// `None` for the whole layer, `Some` for a visible window of an oversized one.
    window: Option<Window>,
}

/// Last resampled overlay layer of an asset.
///
/// A drag changes only the offset, so consecutive frames reuse the same pixels
/// and only re-blit.
#[derive(Debug, Clone, Default)]
pub struct LayerCache {
    entry: RefCell<Option<(LayerKey, RgbaImage)>>,
    resamples: Cell<u32>,
}

impl LayerCache {
    /// Number of times a layer had to be rebuilt.
    #[must_use]
    pub fn resamples(&self) -> u32 {
        self.resamples.get()
    }

    /// Pixel size of the cached layer, if any.
    #[must_use]
    pub fn layer_size(&self) -> Option<(u32, u32)> {
        self.entry.borrow().as_ref().map(|(_, layer)| layer.dimensions())
    }

    fn with_layer(&self, key: LayerKey, build: impl FnOnce() -> RgbaImage, draw: impl FnOnce(&RgbaImage)) {
        let mut entry = self.entry.borrow_mut();
        if entry.as_ref().is_some_and(|(k, _)| *k != key) {
            *entry = None;
        }
        let (_, layer) = entry.get_or_insert_with(|| {
            self.resamples.set(self.resamples.get().saturating_add(1));
            (key, build())
        });
        draw(layer);
    }
}

fn draw_overlay(frame: &mut Frame, asset: &OverlayAsset, transform: OverlayTransform) {
    let Some(dest) = PixelBox::of(transform) else {
        return;
    };
    let Some(window) = dest.visible(frame.width(), frame.height()) else {
        return;
    };
    // Small layers are resampled whole and clipped by the blit. Oversized ones
    // only ever materialize the part that is on the frame.
    let key = LayerKey {
        size: (dest.width, dest.height),
        window: (dest.area() > MAX_LAYER_PIXELS).then_some(window),
    };
    let (x, y) = match key.window {
        None => (dest.left, dest.top),
        Some(w) => (dest.left + w.x, dest.top + w.y),
    };
    asset.layers().with_layer(
        key,
        || match key.window {
            None => resize_exact(asset.pixels(), to_u32(dest.width), to_u32(dest.height)),
            Some(w) => sample_window(asset.pixels(), dest, w),
        },
        |layer| imageops::overlay(frame, layer, x, y),
    );
}

/// Bilinear resample of just `window` out of `src` stretched to `dest`.
#[allow(clippy::cast_precision_loss)]
fn sample_window(src: &RgbaImage, dest: PixelBox, window: Window) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    let fx = f64::from(sw) / dest.width as f64;
    let fy = f64::from(sh) / dest.height as f64;
    let max_x = f64::from(sw.saturating_sub(1));
    let max_y = f64::from(sh.saturating_sub(1));
    RgbaImage::from_fn(to_u32(window.width), to_u32(window.height), |x, y| {
        let u = source_coord(window.x + i64::from(x), fx, max_x);
        let v = source_coord(window.y + i64::from(y), fy, max_y);
        imageops::interpolate_bilinear(src, u, v).unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

/// Source coordinate whose pixel center maps onto destination pixel `d`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn source_coord(d: i64, factor: f64, max: f64) -> f32 {
    ((d as f64 + 0.5) * factor - 0.5).clamp(0.0, max) as f32
}

fn resize_exact(pixels: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if (width, height) == pixels.dimensions() {
        return pixels.clone();
    }
    imageops::resize(pixels, width, height, FilterType::Triangle)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_extent(v: f64) -> u32 {
    if !v.is_finite() {
        return 1;
    }
    v.round().max(1.0) as u32
}

fn to_u32(v: i64) -> u32 {
    u32::try_from(v.max(1)).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_possible_truncation)]
fn whole(v: f64) -> Option<i64> {
    v.is_finite().then(|| v.round() as i64)
}

#[allow(clippy::cast_possible_truncation)]
fn to_offset(v: f64) -> i64 {
    v.round() as i64
}
