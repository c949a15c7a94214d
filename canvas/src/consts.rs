//! Shared numeric constants for the canvas crate.

// ── Surface ─────────────────────────────────────────────────────

/// Default drawing-surface width in pixels.
pub const SURFACE_WIDTH: u32 = 1080;

/// Default drawing-surface height in pixels.
pub const SURFACE_HEIGHT: u32 = 720;

// ── Overlay ─────────────────────────────────────────────────────

/// Smallest width the overlay can be resized to, in surface pixels.
pub const MIN_OVERLAY_WIDTH: f64 = 20.0;

/// Width change per wheel delta unit. Negative so scrolling up enlarges.
pub const WHEEL_GAIN: f64 = -0.1;

/// Overlay placement before the user touches it.
pub const INITIAL_OVERLAY_X: f64 = 400.0;
pub const INITIAL_OVERLAY_Y: f64 = 150.0;
pub const INITIAL_OVERLAY_WIDTH: f64 = 280.0;
pub const INITIAL_OVERLAY_HEIGHT: f64 = 140.0;

// ── Export ──────────────────────────────────────────────────────

/// File name offered for the exported composite.
pub const EXPORT_FILENAME: &str = "photo_with_glasses.png";

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_DEFAULT: &str = "default";
pub const CURSOR_GRAB: &str = "grab";
pub const CURSOR_GRABBING: &str = "grabbing";

// ── Rendering ───────────────────────────────────────────────────

/// Largest overlay layer, in pixels, resampled whole. Bigger overlays are
/// sampled only where they cover the surface.
pub const MAX_LAYER_PIXELS: i64 = 2048 * 2048;
