use tracing::{debug, info, warn};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::config::CanvasConfig;
use crate::consts::{CURSOR_DEFAULT, CURSOR_GRAB, CURSOR_GRABBING};
use crate::decode::{DecodeTicket, Generations, Slot, decode_image};
use crate::export::{Export, ExportError, encode_png};
use crate::geom::{ClientBounds, Point, Surface};
use crate::gesture::{self, Limits};
use crate::hit;
use crate::input::{GestureState, Input, WheelDelta};
use crate::render::{self, Frame};
use crate::scene::{BackgroundImage, OverlayAsset, OverlayTransform, Scene, Stage};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Scene changed; call `render` before the next paint.
    RenderNeeded,
    /// Call `preventDefault()` on the triggering DOM event.
    PreventDefault,
    /// Set the CSS cursor on the canvas element.
    SetCursor(&'static str),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: CanvasConfig,
    pub scene: Scene,
    pub gesture: GestureState,
    generations: Generations,
    /// URL of the asset whose decode is in flight.
    pending_asset: Option<String>,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            scene: Scene::new(&config),
            config,
            gesture: GestureState::default(),
            generations: Generations::default(),
            pending_asset: None,
            cursor: CURSOR_DEFAULT,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn surface(&self) -> Surface {
        self.scene.surface
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.scene.stage()
    }

    /// Export is offered only once both layers have decoded.
    #[must_use]
    pub fn can_export(&self) -> bool {
        self.stage() == Stage::Composed
    }

    #[must_use]
    pub fn transform(&self) -> OverlayTransform {
        self.scene.transform
    }

    /// The asset URL currently selected, whether still decoding or ready.
    #[must_use]
    pub fn selected_asset(&self) -> Option<&str> {
        self.pending_asset
            .as_deref()
            .or_else(|| self.scene.asset.as_ref().map(OverlayAsset::url))
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    // --- Background ---

    /// Begin loading a new background. Any earlier, unfinished request is superseded.
    pub fn request_background(&mut self) -> DecodeTicket {
        debug!("canvas: background requested");
        self.generations.issue(Slot::Background)
    }

    /// Finish a background request with the file's bytes.
    ///
    /// Stale tickets and undecodable bytes leave the scene untouched; a previous
    /// background, if any, stays on screen.
    pub fn complete_background(&mut self, ticket: DecodeTicket, bytes: &[u8]) -> Vec<Action> {
        if !self.accepts(ticket, Slot::Background) {
            return Vec::new();
        }
        match decode_image(bytes) {
            Ok(pixels) => {
                let background = BackgroundImage::fit(&pixels, self.scene.surface);
                let (width, height) = background.size();
                info!(width, height, scale = background.placement().scale, "canvas: background ready");
                self.scene.background = Some(background);
                vec![Action::RenderNeeded]
            }
            Err(e) => {
                warn!(error = %e, "canvas: background decode failed");
                Vec::new()
            }
        }
    }

    // --- Overlay asset ---

    /// React to a menu selection.
    ///
    /// Returns a ticket when the host must fetch the asset's bytes. Re-selecting
    /// the current asset is a no-op. The previous overlay is dropped immediately
    /// so it can never be drawn with the new selection's geometry.
    pub fn select_asset(&mut self, url: Option<String>) -> (Option<DecodeTicket>, Vec<Action>) {
        if url.as_deref() == self.selected_asset() {
            return (None, Vec::new());
        }

        let mut actions = Vec::new();
        if self.scene.asset.take().is_some() {
            actions.push(Action::RenderNeeded);
        }
        self.gesture = GestureState::default();
        self.set_cursor(CURSOR_DEFAULT, &mut actions);

        match url {
            Some(url) => {
                info!(%url, "canvas: asset selected");
                self.pending_asset = Some(url);
                (Some(self.generations.issue(Slot::Asset)), actions)
            }
            None => {
                info!("canvas: asset cleared");
                self.pending_asset = None;
                self.generations.invalidate(Slot::Asset);
                (None, actions)
            }
        }
    }

    /// Finish an asset request with the fetched bytes.
    ///
    /// On success the aspect ratio is cached and the overlay height recomputed
    /// from the current width; position and width are kept.
    pub fn complete_asset(&mut self, ticket: DecodeTicket, bytes: &[u8]) -> Vec<Action> {
        if !self.accepts(ticket, Slot::Asset) {
            return Vec::new();
        }
        let Some(url) = self.pending_asset.take() else {
            return Vec::new();
        };
        let pixels = match decode_image(bytes) {
            Ok(pixels) => pixels,
            Err(e) => {
                warn!(%url, error = %e, "canvas: asset decode failed");
                return Vec::new();
            }
        };
        let Some(asset) = OverlayAsset::new(url, pixels) else {
            return Vec::new();
        };

        let aspect = asset.aspect();
        let transform = &mut self.scene.transform;
        transform.height = aspect.height_for(transform.width);

        let (width, height) = asset.size();
        info!(url = asset.url(), width, height, aspect = aspect.value(), "canvas: asset ready");
        self.scene.asset = Some(asset);
        vec![Action::RenderNeeded]
    }

    /// The host could not obtain bytes for `ticket` (file read or fetch failed).
    pub fn fail_decode(&mut self, ticket: DecodeTicket, reason: &str) {
        if !self.generations.is_current(ticket) {
            return;
        }
        self.generations.invalidate(ticket.slot());
        match ticket.slot() {
            Slot::Background => warn!(reason, "canvas: background load failed"),
            Slot::Asset => {
                let url = self.pending_asset.take();
                warn!(url = ?url, reason, "canvas: asset load failed");
            }
        }
    }

    fn accepts(&self, ticket: DecodeTicket, slot: Slot) -> bool {
        if ticket.slot() != slot {
            warn!(expected = ?slot, got = ?ticket.slot(), "canvas: ticket for the wrong layer");
            return false;
        }
        if !self.generations.is_current(ticket) {
            debug!(?slot, "canvas: discarding superseded decode");
            return false;
        }
        true
    }

    // --- Input events (surface coordinates) ---

    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        self.apply(Input::PointerDown(pt))
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.apply(Input::PointerMove(pt))
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.apply(Input::PointerUp)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.apply(Input::Wheel(delta))
    }

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        self.apply(Input::TouchStart(touches))
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        self.apply(Input::TouchMove(touches))
    }

    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        self.apply(Input::TouchEnd(remaining))
    }

    fn apply(&mut self, input: Input<'_>) -> Vec<Action> {
        let mut actions = Vec::new();
        if input.suppresses_default() {
            actions.push(Action::PreventDefault);
        }
        // The overlay only responds once it is actually on screen.
        if self.stage() != Stage::Composed {
            return actions;
        }

        let was_dragging = self.gesture.is_dragging();
        let before = self.scene.transform;
        let out = gesture::step(before, self.gesture, self.scene.aspect(), input, self.limits());
        self.scene.transform = out.transform;
        self.gesture = out.gesture;
        if out.transform != before {
            actions.push(Action::RenderNeeded);
        }

        let over_overlay = match input {
            Input::PointerDown(pt) | Input::PointerMove(pt) => hit::contains(out.transform.rect(), pt),
            Input::PointerUp => was_dragging,
            _ => self.cursor != CURSOR_DEFAULT,
        };
        let cursor = if self.gesture.is_dragging() {
            CURSOR_GRABBING
        } else if over_overlay {
            CURSOR_GRAB
        } else {
            CURSOR_DEFAULT
        };
        self.set_cursor(cursor, &mut actions);
        actions
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    fn limits(&self) -> Limits {
        Limits {
            min_width: self.config.min_overlay_width,
            wheel_gain: self.config.wheel_gain,
        }
    }

    // --- Output ---

    /// Rebuild the frame from the current scene.
    #[must_use]
    pub fn render(&self) -> Frame {
        render::render(&self.scene)
    }

    /// Encode the composed surface as a PNG download.
    ///
    /// # Errors
    ///
    /// Returns `NotComposed` unless both layers are ready, or `Encode` if PNG
    /// encoding fails.
    pub fn export(&self) -> Result<Export, ExportError> {
        let stage = self.stage();
        if stage != Stage::Composed {
            return Err(ExportError::NotComposed { stage });
        }
        let bytes = encode_png(&self.render())?;
        info!(size = bytes.len(), filename = %self.config.export_filename, "canvas: exported png");
        Ok(Export {
            filename: self.config.export_filename.clone(),
            bytes,
        })
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Bind to `canvas`, sizing its backing store to the configured surface.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: CanvasConfig) -> Result<Self, JsValue> {
        canvas.set_width(config.surface_width);
        canvas.set_height(config.surface_height);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas: 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("canvas: context is not CanvasRenderingContext2d"))?;
        Ok(Self { canvas, ctx, core: EngineCore::new(config) })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Map a client-space point (`clientX`/`clientY`) into surface pixels using
    /// the element's current on-screen box.
    #[must_use]
    pub fn to_surface(&self, client: Point) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let bounds = ClientBounds {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        bounds.to_surface(client, self.core.surface())
    }

    fn touches_to_surface(&self, touches: &[Point]) -> Vec<Point> {
        touches.iter().map(|t| self.to_surface(*t)).collect()
    }

    // --- Delegated data inputs ---

    pub fn request_background(&mut self) -> DecodeTicket {
        self.core.request_background()
    }

    pub fn complete_background(&mut self, ticket: DecodeTicket, bytes: &[u8]) -> Vec<Action> {
        self.core.complete_background(ticket, bytes)
    }

    pub fn select_asset(&mut self, url: Option<String>) -> (Option<DecodeTicket>, Vec<Action>) {
        self.core.select_asset(url)
    }

    pub fn complete_asset(&mut self, ticket: DecodeTicket, bytes: &[u8]) -> Vec<Action> {
        self.core.complete_asset(ticket, bytes)
    }

    pub fn fail_decode(&mut self, ticket: DecodeTicket, reason: &str) {
        self.core.fail_decode(ticket, reason);
    }

    // --- Input events (client coordinates) ---

    pub fn on_pointer_down(&mut self, client: Point) -> Vec<Action> {
        let pt = self.to_surface(client);
        self.core.on_pointer_down(pt)
    }

    pub fn on_pointer_move(&mut self, client: Point) -> Vec<Action> {
        let pt = self.to_surface(client);
        self.core.on_pointer_move(pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        let pts = self.touches_to_surface(touches);
        self.core.on_touch_start(&pts)
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        let pts = self.touches_to_surface(touches);
        self.core.on_touch_move(&pts)
    }

    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        let pts = self.touches_to_surface(remaining);
        self.core.on_touch_end(&pts)
    }

    // --- Render ---

    /// Draw the current state to the canvas, replacing every pixel.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser rejects the image data.
    pub fn render(&self) -> Result<(), JsValue> {
        let frame = self.core.render();
        let (width, height) = frame.dimensions();
        let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(frame.as_raw().as_slice()), width, height)?;
        self.ctx.put_image_data(&data, 0.0, 0.0)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.core.stage()
    }

    #[must_use]
    pub fn can_export(&self) -> bool {
        self.core.can_export()
    }

    /// # Errors
    ///
    /// See [`EngineCore::export`].
    pub fn export(&self) -> Result<Export, ExportError> {
        self.core.export()
    }
}
