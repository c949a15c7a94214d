//! Glasses picker. Lists discovered assets and forwards the chosen URL to the
//! canvas engine.

use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::host::{EngineSlot, load_asset};
use crate::state::menu::AssetMenu;
use crate::state::studio::StudioState;

/// `menu` is `None` while discovery is still probing.
#[component]
pub fn AssetMenuPanel(
    menu: RwSignal<Option<AssetMenu>>,
    engine: EngineSlot,
    studio: RwSignal<StudioState>,
) -> impl IntoView {
    let options = move || {
        menu.with(|m| {
            m.as_ref()
                .map(|m| m.options().iter().cloned().enumerate().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };
    let empty = move || menu.with(|m| m.as_ref().and_then(AssetMenu::empty_message));

    view! {
        <div class="menu">
            <h2>"Choose your glasses"</h2>
            <div class="glasses-options">
                <For
                    each=options
                    key=|(_, url)| url.clone()
                    children=move |(index, url)| {
                        let selected_url = url.clone();
                        let is_selected = move || {
                            menu.with(|m| m.as_ref().is_some_and(|m| m.is_selected(&selected_url)))
                        };
                        let choose_url = url.clone();
                        let on_click = move |_: MouseEvent| choose(menu, engine, studio, &choose_url);
                        view! {
                            <div class="glasses-item" class:selected=is_selected on:click=on_click>
                                <img src=url alt=AssetMenu::label(index)/>
                            </div>
                        }
                    }
                />
                {move || empty().map(|msg| view! { <p class="menu-empty">{msg}</p> })}
            </div>
        </div>
    }
}

fn choose(menu: RwSignal<Option<AssetMenu>>, engine: EngineSlot, studio: RwSignal<StudioState>, url: &str) {
    let mut forwarded = None;
    menu.update(|m| {
        if let Some(m) = m {
            forwarded = m.select(url).map(str::to_owned);
        }
    });
    if forwarded.is_some() {
        load_asset(engine, studio, forwarded);
    }
}
