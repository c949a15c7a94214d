//! Application state that lives outside the canvas engine.

pub mod menu;
pub mod studio;
