pub mod action_bar;
pub mod asset_menu;
pub mod canvas_host;
