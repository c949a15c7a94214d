//! Bridge between the Leptos UI and the imperative `canvas::Engine`.
//!
//! The engine lives in a local `StoredValue` so event handlers can reach it
//! without cloning. Every call goes through [`drive`], which carries out the
//! engine's returned actions and refreshes the reactive [`StudioState`].

use canvas::engine::{Action, Engine};
use canvas::geom::Point;
use js_sys::Uint8Array;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, TouchList};

use crate::config::CONFIG_ELEMENT_ID;
use crate::net::assets::fetch_bytes;
use crate::state::studio::StudioState;

/// The engine, once the canvas element has mounted.
pub type EngineSlot = StoredValue<Option<Engine>, LocalStorage>;

/// Run `f` against the bound engine and carry out what it asks for.
///
/// Does nothing before the canvas mounts.
pub fn drive<F>(engine: EngineSlot, studio: RwSignal<StudioState>, event: Option<&Event>, f: F)
where
    F: FnOnce(&mut Engine) -> Vec<Action>,
{
    engine.update_value(|slot| {
        let Some(e) = slot.as_mut() else {
            return;
        };
        let actions = f(e);
        apply_actions(e, &actions, event);

        let next = StudioState::from_core(&e.core);
        if studio.with_untracked(|s| *s != next) {
            studio.set(next);
        }
    });
}

fn apply_actions(engine: &Engine, actions: &[Action], event: Option<&Event>) {
    let mut render = false;
    for action in actions {
        match action {
            Action::RenderNeeded => render = true,
            Action::PreventDefault => {
                if let Some(ev) = event {
                    ev.prevent_default();
                }
            }
            Action::SetCursor(cursor) => {
                if let Err(e) = engine.canvas().style().set_property("cursor", cursor) {
                    log::warn!("canvas: failed to set cursor {cursor}: {e:?}");
                }
            }
        }
    }
    // One repaint per event, however many mutations it caused.
    if render {
        if let Err(e) = engine.render() {
            log::error!("canvas: render failed: {e:?}");
        }
    }
}

/// Decode a user-chosen photo into the background layer.
pub fn load_background(engine: EngineSlot, studio: RwSignal<StudioState>, file: File) {
    let mut ticket = None;
    drive(engine, studio, None, |e| {
        ticket = Some(e.request_background());
        Vec::new()
    });
    let Some(ticket) = ticket else {
        log::warn!("canvas: photo chosen before the canvas mounted");
        return;
    };

    log::info!("canvas: reading photo {} ({} bytes)", file.name(), file.size());
    spawn_local(async move {
        match read_file(&file).await {
            Ok(bytes) => drive(engine, studio, None, |e| e.complete_background(ticket, &bytes)),
            Err(err) => drive(engine, studio, None, |e| {
                e.fail_decode(ticket, &format!("{err:?}"));
                Vec::new()
            }),
        }
    });
}

/// Point the overlay at `url` (or clear it) and fetch the new asset.
pub fn load_asset(engine: EngineSlot, studio: RwSignal<StudioState>, url: Option<String>) {
    let fetch_url = url.clone();
    let mut ticket = None;
    drive(engine, studio, None, |e| {
        let (t, actions) = e.select_asset(url);
        ticket = t;
        actions
    });
    let (Some(ticket), Some(url)) = (ticket, fetch_url) else {
        return;
    };

    spawn_local(async move {
        match fetch_bytes(&url).await {
            Ok(bytes) => drive(engine, studio, None, |e| e.complete_asset(ticket, &bytes)),
            Err(err) => drive(engine, studio, None, |e| {
                e.fail_decode(ticket, &err.to_string());
                Vec::new()
            }),
        }
    });
}

async fn read_file(file: &File) -> Result<Vec<u8>, wasm_bindgen::JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

#[must_use]
pub fn client_point(x: i32, y: i32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

/// Client-space positions of every touch in `list`.
#[must_use]
pub fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| client_point(t.client_x(), t.client_y()))
        .collect()
}

/// Text of the page's embedded config block, if the page has one.
pub fn embedded_config() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}
