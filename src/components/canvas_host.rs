//! Mounts the `<canvas>` element, binds `canvas::Engine` to it, and forwards
//! mouse, wheel, and touch events.

use canvas::config::CanvasConfig;
use canvas::engine::Engine;
use canvas::input::WheelDelta;
use leptos::prelude::*;
use web_sys::{MouseEvent, TouchEvent, WheelEvent};

use crate::host::{EngineSlot, client_point, drive, touch_points};
use crate::state::studio::StudioState;

/// Canvas host: creates the engine once the element is in the DOM.
#[component]
pub fn CanvasHost(engine: EngineSlot, studio: RwSignal<StudioState>, config: CanvasConfig) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if engine.with_value(Option::is_some) {
            return;
        }
        match Engine::new(canvas, config.clone()) {
            Ok(bound) => {
                log::info!("canvas: engine bound at {}x{}", config.surface_width, config.surface_height);
                engine.set_value(Some(bound));
            }
            Err(e) => log::error!("canvas: failed to bind engine: {e:?}"),
        }
    });

    let on_mouse_down = move |ev: MouseEvent| {
        let pt = client_point(ev.client_x(), ev.client_y());
        drive(engine, studio, Some(ev.as_ref()), |e| e.on_pointer_down(pt));
    };
    let on_mouse_move = move |ev: MouseEvent| {
        let pt = client_point(ev.client_x(), ev.client_y());
        drive(engine, studio, Some(ev.as_ref()), |e| e.on_pointer_move(pt));
    };
    let on_mouse_up = move |ev: MouseEvent| {
        drive(engine, studio, Some(ev.as_ref()), Engine::on_pointer_up);
    };
    let on_wheel = move |ev: WheelEvent| {
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        drive(engine, studio, Some(ev.as_ref()), |e| e.on_wheel(delta));
    };
    let on_touch_start = move |ev: TouchEvent| {
        let pts = touch_points(&ev.touches());
        drive(engine, studio, Some(ev.as_ref()), |e| e.on_touch_start(&pts));
    };
    let on_touch_move = move |ev: TouchEvent| {
        let pts = touch_points(&ev.touches());
        drive(engine, studio, Some(ev.as_ref()), |e| e.on_touch_move(&pts));
    };
    let on_touch_end = move |ev: TouchEvent| {
        let remaining = touch_points(&ev.touches());
        drive(engine, studio, Some(ev.as_ref()), |e| e.on_touch_end(&remaining));
    };

    view! {
        <div class="canvas-container">
            <canvas
                class="canvas-host"
                node_ref=canvas_ref
                on:mousedown=on_mouse_down
                on:mousemove=on_mouse_move
                on:mouseup=on_mouse_up
                on:wheel=on_wheel
                on:touchstart=on_touch_start
                on:touchmove=on_touch_move
                on:touchend=on_touch_end
                on:touchcancel=on_touch_end
            >
                "Your browser does not support canvas."
            </canvas>
        </div>
    }
}
