//! Canvas compositing engine for the glasses try-on page.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! photo and overlay layers, turns pointer, wheel, and touch input into
//! overlay moves and resizes, rasterises the composed surface, and encodes it
//! as PNG for download. The host layer only wires DOM events to the engine,
//! fetches bytes, and carries out the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Background, overlay asset, and overlay transform |
//! | [`gesture`] | Pure transition from input to transform and gesture state |
//! | [`input`] | Input event types and gesture state |
//! | [`hit`] | Point-in-overlay tests |
//! | [`geom`] | Points, rects, and client-to-surface mapping |
//! | [`decode`] | Image decoding and stale-decode tickets |
//! | [`render`] | Background fit and frame rasterisation |
//! | [`export`] | PNG encoding of the composed frame |
//! | [`config`] | Runtime configuration from env or JSON |
//! | [`consts`] | Default sizes, gains, and cursor names |

pub mod config;
pub mod consts;
pub mod decode;
pub mod engine;
pub mod export;
pub mod geom;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
