//! Scene model: background layer, overlay asset, and the overlay transform.
//!
//! A [`Scene`] is everything the renderer needs to rebuild a frame from scratch.
//! Layers are `None` until their decode has succeeded, so a missing or broken
//! image simply means "nothing drawn for that layer".

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use image::RgbaImage;

use crate::config::CanvasConfig;
use crate::geom::{Rect, Surface};
use crate::render::{self, LayerCache, Placement};

/// Width-over-height ratio of an overlay asset. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Ratio for an intrinsic pixel size; `None` if either side is zero.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then(|| Self(f64::from(width) / f64::from(height)))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Height that keeps `width` at this ratio.
    #[must_use]
    pub fn height_for(self, width: f64) -> f64 {
        width / self.0
    }
}

/// Overlay placement in surface pixels: top-left corner plus rendered size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayTransform {
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self { x: rect.x, y: rect.y, width: rect.width, height: rect.height }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Same size, new top-left corner.
    #[must_use]
    pub fn moved_to(self, x: f64, y: f64) -> Self {
        if !(x.is_finite() && y.is_finite()) {
            return self;
        }
        Self { x, y, ..self }
    }

    /// Uniform resize around the top-left corner.
    ///
    /// `width` is floored at `min_width`; the height follows `aspect` when one is
    /// known and is left alone otherwise. Non-finite widths are ignored.
    #[must_use]
    pub fn resized(self, width: f64, aspect: Option<AspectRatio>, min_width: f64) -> Self {
        if !width.is_finite() {
            return self;
        }
        let width = width.max(min_width);
        let height = aspect.map_or(self.height, |a| a.height_for(width));
        Self { width, height, ..self }
    }
}

/// The user's photo, already scaled into its on-surface placement.
///
/// Placement depends only on the image and the (immutable) surface, so the
/// scaled layer is computed once on load and reused by every frame.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    width: u32,
    height: u32,
    placement: Placement,
    layer: RgbaImage,
}

impl BackgroundImage {
    /// Scale `pixels` to fit `surface`, centered.
    #[must_use]
    pub fn fit(pixels: &RgbaImage, surface: Surface) -> Self {
        let (width, height) = pixels.dimensions();
        let placement = render::place_background(surface, width, height);
        let layer = render::scale_layer(pixels, placement.width, placement.height);
        Self { width, height, placement, layer }
    }

    /// Intrinsic pixel size of the uploaded image.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn layer(&self) -> &RgbaImage {
        &self.layer
    }
}

/// A decoded glasses graphic, plus its last resampled layer.
#[derive(Debug, Clone)]
pub struct OverlayAsset {
    url: String,
    aspect: AspectRatio,
    pixels: RgbaImage,
    layers: LayerCache,
}

impl OverlayAsset {
    /// Wrap decoded pixels; `None` for a zero-area image.
    #[must_use]
    pub fn new(url: String, pixels: RgbaImage) -> Option<Self> {
        let (width, height) = pixels.dimensions();
        let aspect = AspectRatio::from_size(width, height)?;
        Some(Self { url, aspect, pixels, layers: LayerCache::default() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    /// Intrinsic pixel size of the asset.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    #[must_use]
    pub fn layers(&self) -> &LayerCache {
        &self.layers
    }
}

/// Lifecycle stage derived from which layers are ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No background yet; the surface is blank.
    Empty,
    /// Background drawn, no overlay ready.
    BackgroundOnly,
    /// Both layers ready; the overlay is interactive and export is enabled.
    Composed,
}

/// Everything a frame is rebuilt from.
#[derive(Debug, Clone)]
pub struct Scene {
    pub surface: Surface,
    pub background: Option<BackgroundImage>,
    pub asset: Option<OverlayAsset>,
    pub transform: OverlayTransform,
}

impl Scene {
    #[must_use]
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            surface: config.surface(),
            background: None,
            asset: None,
            transform: OverlayTransform::from_rect(config.initial_overlay),
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        match (&self.background, &self.asset) {
            (None, _) => Stage::Empty,
            (Some(_), None) => Stage::BackgroundOnly,
            (Some(_), Some(_)) => Stage::Composed,
        }
    }

    /// Aspect ratio of the current asset, if one is ready.
    #[must_use]
    pub fn aspect(&self) -> Option<AspectRatio> {
        self.asset.as_ref().map(OverlayAsset::aspect)
    }
}
