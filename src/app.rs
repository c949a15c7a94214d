//! Root application component.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Title, provide_meta_context};

use crate::components::{action_bar::ActionBar, asset_menu::AssetMenuPanel, canvas_host::CanvasHost};
use crate::config::AppConfig;
use crate::host::{self, EngineSlot};
use crate::net::assets::HttpProbe;
use crate::state::menu::{AssetMenu, discover};
use crate::state::studio::StudioState;

/// Root application component.
///
/// Owns the shared state handles and starts asset discovery on mount.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load(host::embedded_config().as_deref());
    let menu = RwSignal::new(None::<AssetMenu>);
    let studio = RwSignal::new(StudioState::default());
    let engine: EngineSlot = StoredValue::new_local(None);

    let discovery = config.discovery.clone();
    spawn_local(async move {
        let found = discover(&discovery, &HttpProbe).await;
        menu.set(Some(found));
    });

    view! {
        <Title text="Glasses Try-On"/>
        <div class="container">
            <AssetMenuPanel menu=menu engine=engine studio=studio/>
            <div class="main-content">
                <ActionBar engine=engine studio=studio/>
                <CanvasHost engine=engine studio=studio config=config.canvas/>
                <div class="instructions-container">
                    <p class="drag-instruction">{move || studio.with(StudioState::hint)}</p>
                </div>
            </div>
        </div>
    }
}
