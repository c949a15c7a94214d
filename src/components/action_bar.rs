//! Photo picker and save button.

use canvas::engine::Engine;
use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::host::{EngineSlot, load_background};
use crate::state::studio::StudioState;
use crate::util::download::save_png;

#[component]
pub fn ActionBar(engine: EngineSlot, studio: RwSignal<StudioState>) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_pick = move |_: MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };
    let on_change = move |_: web_sys::Event| {
        let Some(input) = input_ref.get() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Clear so picking the same file again still fires `change`.
        input.set_value("");
        load_background(engine, studio, file);
    };
    let on_save = move |_: MouseEvent| save(engine);

    view! {
        <div class="action-buttons" class:composed=move || studio.with(StudioState::can_export)>
            <button class="upload-btn" on:click=on_pick>"Choose Photo"</button>
            <Show when=move || studio.with(StudioState::can_export)>
                <button class="save-btn" on:click=on_save>"Save"</button>
            </Show>
        </div>
        <input
            type="file"
            accept="image/*"
            style="display: none"
            node_ref=input_ref
            on:change=on_change
        />
    }
}

fn save(engine: EngineSlot) {
    match engine.with_value(|slot| slot.as_ref().map(Engine::export)) {
        Some(Ok(export)) => {
            if let Err(e) = save_png(&export) {
                log::error!("export: download failed: {e:?}");
            }
        }
        Some(Err(e)) => log::warn!("export: {e}"),
        None => log::warn!("export: canvas not mounted"),
    }
}
