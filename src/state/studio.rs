#[cfg(test)]
#[path = "studio_test.rs"]
mod studio_test;

use canvas::consts::CURSOR_DEFAULT;
use canvas::engine::EngineCore;
use canvas::scene::Stage;

pub const HINT_START: &str = "Choose a photo to get started.";
pub const HINT_ADJUST: &str = "Scroll or pinch to resize the glasses. Drag them into place.";

/// Reactive mirror of the engine state the page chrome depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudioState {
    pub stage: Stage,
    pub cursor: &'static str,
    pub asset_selected: bool,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            stage: Stage::Empty,
            cursor: CURSOR_DEFAULT,
            asset_selected: false,
        }
    }
}

impl StudioState {
    #[must_use]
    pub fn from_core(core: &EngineCore) -> Self {
        Self {
            stage: core.stage(),
            cursor: core.cursor(),
            asset_selected: core.selected_asset().is_some(),
        }
    }

    /// The save button is only offered once both layers are on the canvas.
    #[must_use]
    pub fn can_export(&self) -> bool {
        self.stage == Stage::Composed
    }

    /// Instruction line under the canvas.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        if self.asset_selected { HINT_ADJUST } else { HINT_START }
    }
}
